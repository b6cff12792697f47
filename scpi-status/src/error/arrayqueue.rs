use arrayvec::ArrayVec;

use super::{Error, ErrorCode, ErrorQueue};

/// Fixed-capacity error queue usable without an allocator.
///
/// The capacity is fixed when the queue is created; a full queue records a
/// `-350, "Queue overflow"` in its newest slot and drops the offending
/// error.
#[derive(Debug, Default)]
pub struct ArrayErrorQueue<const CAP: usize> {
    vec: ArrayVec<Error, CAP>,
}

impl<const CAP: usize> ArrayErrorQueue<CAP> {
    pub fn new() -> Self {
        ArrayErrorQueue {
            vec: ArrayVec::new(),
        }
    }
}

impl<const CAP: usize> ErrorQueue for ArrayErrorQueue<CAP> {
    fn push_back_error(&mut self, err: Error) {
        if self.vec.try_push(err).is_err() {
            // Full: the newest slot records the overflow instead
            if let Some(last) = self.vec.last_mut() {
                *last = ErrorCode::QueueOverflow.into();
            }
        }
    }

    fn pop_front_error(&mut self) -> Option<Error> {
        self.vec.pop_at(0)
    }

    fn num_errors(&self) -> usize {
        self.vec.len()
    }

    fn clear_errors(&mut self) {
        self.vec.clear()
    }
}

#[cfg(test)]
mod test_error_queue {
    use super::*;

    #[test]
    fn test_queue_fifo() {
        let mut errors = ArrayErrorQueue::<10>::new();
        errors.push_back_error(ErrorCode::InvalidCharacter.into());
        errors.push_back_error(ErrorCode::InvalidSeparator.into());
        assert_eq!(errors.num_errors(), 2);
        assert_eq!(
            errors.pop_front_error(),
            Some(Error::new(ErrorCode::InvalidCharacter))
        );
        assert_eq!(
            errors.pop_front_error(),
            Some(Error::new(ErrorCode::InvalidSeparator))
        );
        assert_eq!(errors.pop_front_error(), None);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_queue_overflow() {
        let mut errors = ArrayErrorQueue::<2>::new();
        errors.push_back_error(Error::custom(1, b"One"));
        errors.push_back_error(Error::custom(2, b"Two"));
        errors.push_back_error(Error::custom(3, b"Three"));
        // The offending error is dropped, the newest slot records the overflow
        assert_eq!(errors.num_errors(), 2);
        assert_eq!(errors.pop_front_error(), Some(Error::custom(1, b"One")));
        assert_eq!(
            errors.pop_front_error(),
            Some(Error::new(ErrorCode::QueueOverflow))
        );
    }

    #[test]
    fn test_queue_clear() {
        let mut errors = ArrayErrorQueue::<4>::new();
        errors.push_back_error(ErrorCode::SystemError.into());
        errors.clear_errors();
        assert_eq!(errors.num_errors(), 0);
        assert_eq!(errors.pop_front_error(), None);
    }
}
