//! Tests for worker messages: wire shape and request processing

#[cfg(test)]
mod tests {
    use serde_json::json;
    use std::ops::ControlFlow;
    use std::time::Duration;
    use wordlinks::algorithm::matrix::OptionMap;
    use wordlinks::algorithm::protocol::{WorkerRequest, WorkerResponse, serve};
    use wordlinks::algorithm::search::SearchOutcome;

    fn options(entries: &[(&str, &[char])]) -> OptionMap<char> {
        entries
            .iter()
            .map(|(name, items)| ((*name).to_string(), items.to_vec()))
            .collect()
    }

    fn request(given_options: &[&str]) -> WorkerRequest<char> {
        WorkerRequest::Solve {
            options: options(&[("ab", &['a', 'b']), ("c", &['c']), ("a", &['a'])]),
            items: Vec::new(),
            given_options: given_options.iter().map(ToString::to_string).collect(),
        }
    }

    fn serve_all(request: WorkerRequest<char>) -> (SearchOutcome, Vec<WorkerResponse>) {
        let mut responses = Vec::new();
        let outcome = serve(
            request,
            Duration::ZERO,
            |response| {
                responses.push(response);
                ControlFlow::Continue(())
            },
            || ControlFlow::Continue(()),
        )
        .expect("valid request");
        (outcome, responses)
    }

    // Tests a plain request serializes to the bare solve shape
    #[test]
    fn test_request_wire_shape() {
        let value = serde_json::to_value(request(&[])).expect("serializable");

        assert_eq!(
            value,
            json!({
                "type": "solve",
                "options": { "a": ["a"], "ab": ["a", "b"], "c": ["c"] }
            })
        );
    }

    // Tests absent optional fields default to empty lists
    #[test]
    fn test_request_without_optional_fields() {
        let text = r#"{"type":"solve","options":{"c":["c"]}}"#;

        let parsed: WorkerRequest<char> = serde_json::from_str(text).expect("valid json");

        assert_eq!(
            parsed,
            WorkerRequest::Solve {
                options: options(&[("c", &['c'])]),
                items: Vec::new(),
                given_options: Vec::new(),
            }
        );
    }

    // Tests optional request fields are read back when present
    #[test]
    fn test_request_with_optional_fields() {
        let text = r#"{"type":"solve","options":{"x":["x"]},"items":["x","y"],"givenOptions":["x"]}"#;

        let parsed: WorkerRequest<char> = serde_json::from_str(text).expect("valid json");

        assert_eq!(
            parsed,
            WorkerRequest::Solve {
                options: options(&[("x", &['x'])]),
                items: vec!['x', 'y'],
                given_options: vec!["x".to_string()],
            }
        );
    }

    // Tests responses serialize with a lowercase type tag
    #[test]
    fn test_response_wire_shape() {
        let solution = WorkerResponse::Solution {
            solution: vec!["ab".to_string(), "c".to_string()],
        };

        assert_eq!(
            serde_json::to_value(&solution).expect("serializable"),
            json!({ "type": "solution", "solution": ["ab", "c"] })
        );
        assert_eq!(
            serde_json::to_value(&WorkerResponse::Completed).expect("serializable"),
            json!({ "type": "completed" })
        );
    }

    // Tests solutions stream before a single completion
    #[test]
    fn test_serve_streams_then_completes() {
        let (outcome, responses) = serve_all(request(&[]));

        assert_eq!(outcome, SearchOutcome::Exhausted);
        assert_eq!(
            responses,
            vec![
                WorkerResponse::Solution {
                    solution: vec!["ab".to_string(), "c".to_string()],
                },
                WorkerResponse::Completed,
            ]
        );
    }

    // Tests a contradictory forced option still completes, with no solutions
    #[test]
    fn test_contradiction_completes_without_solutions() {
        let (outcome, responses) = serve_all(request(&["missing"]));

        assert!(matches!(outcome, SearchOutcome::Contradiction { .. }));
        assert_eq!(responses, vec![WorkerResponse::Completed]);
    }

    // Tests an explicit universe leaves unmentioned items uncoverable
    #[test]
    fn test_explicit_items_are_honoured() {
        let (_, responses) = serve_all(WorkerRequest::Solve {
            options: options(&[("a", &['a'])]),
            items: vec!['a', 'b'],
            given_options: Vec::new(),
        });

        assert_eq!(responses, vec![WorkerResponse::Completed]);
    }

    // Tests a pulse callback break abandons the request without completion
    #[test]
    fn test_pulse_break_stops_without_completion() {
        let mut responses = Vec::new();
        let outcome = serve(
            request(&[]),
            Duration::ZERO,
            |response| {
                responses.push(response);
                ControlFlow::Continue(())
            },
            || ControlFlow::Break(()),
        )
        .expect("valid request");

        assert_eq!(outcome, SearchOutcome::Stopped);
        assert!(responses.is_empty());
    }

    // Tests a malformed request is an error rather than an empty result
    #[test]
    fn test_malformed_request_is_error() {
        let result = serve(
            WorkerRequest::Solve {
                options: options(&[("none", &[])]),
                items: Vec::new(),
                given_options: Vec::new(),
            },
            Duration::ZERO,
            |_| ControlFlow::Continue(()),
            || ControlFlow::Continue(()),
        );

        assert!(result.is_err());
    }
}
