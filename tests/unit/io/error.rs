//! Tests for error messages and source chaining

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::io;
    use wordlinks::CoverError;
    use wordlinks::io::error::{file_system_error, invalid_parameter};

    // Tests file system errors chain their I/O source
    #[test]
    fn test_file_system_error_source() {
        let error = file_system_error(
            "words.txt",
            "read",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );

        assert!(error.source().is_some());
        let message = error.to_string();
        assert!(message.contains("read"));
        assert!(message.contains("words.txt"));
    }

    // Tests spawn errors chain their I/O source
    #[test]
    fn test_worker_spawn_error_source() {
        let error = CoverError::WorkerSpawn {
            worker: 3,
            source: io::Error::other("no threads"),
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("worker 3"));
    }

    // Tests errors without an underlying cause have no source
    #[test]
    fn test_plain_errors_have_no_source() {
        let error = CoverError::WorkerDisconnected { worker: 1 };

        assert!(error.source().is_none());
        assert!(error.to_string().contains("Worker 1"));
    }

    // Tests panic errors carry the worker index and the payload
    #[test]
    fn test_worker_panicked_message() {
        let error = CoverError::WorkerPanicked {
            worker: 2,
            message: "index out of bounds".to_string(),
        };

        assert!(error.source().is_none());
        assert_eq!(error.to_string(), "Worker 2 panicked: index out of bounds");
    }

    // Tests invalid parameter errors carry name, value and reason
    #[test]
    fn test_invalid_parameter_message() {
        let message = invalid_parameter("concurrency", &0, &"must be positive").to_string();

        assert!(message.contains("concurrency"));
        assert!(message.contains('0'));
        assert!(message.contains("must be positive"));
    }

    // Tests option errors name both option and item
    #[test]
    fn test_option_error_messages() {
        let unknown = CoverError::UnknownItem {
            option: "ab".to_string(),
            item: "b".to_string(),
        };
        assert_eq!(unknown.to_string(), "Option 'ab' refers to unknown item 'b'");

        let duplicate = CoverError::DuplicateItem {
            option: "aa".to_string(),
            item: "a".to_string(),
        };
        assert_eq!(
            duplicate.to_string(),
            "Option 'aa' lists item 'a' more than once"
        );

        let empty = CoverError::EmptyOption {
            option: "none".to_string(),
        };
        assert_eq!(empty.to_string(), "Option 'none' covers no items");
    }

    // Tests uncoverable items are listed in the message
    #[test]
    fn test_uncoverable_items_message() {
        let error = CoverError::UncoverableItems {
            items: vec!["j".to_string(), "q".to_string()],
        };

        assert_eq!(error.to_string(), "Items covered by no option: j, q");
    }

    // Tests word list errors include their reason
    #[test]
    fn test_invalid_word_list_message() {
        let error = CoverError::InvalidWordList {
            reason: "too many lists".to_string(),
        };

        assert_eq!(error.to_string(), "Invalid word list: too many lists");
    }
}
