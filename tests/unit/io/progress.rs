//! Tests for the sub-instance progress bar

#[cfg(test)]
mod tests {
    use wordlinks::algorithm::dispatch::DispatchProgress;
    use wordlinks::io::progress::ProgressManager;

    // Tests the bar goes through a full solve lifecycle
    #[test]
    fn test_progress_lifecycle() {
        let pm = ProgressManager::new(4, 2);

        for completed in 1..=4 {
            pm.update(&DispatchProgress {
                completed,
                in_flight: 4 - completed,
                total: 4,
                solutions: completed * 2,
            });
        }
        pm.finish();
    }

    // Tests suspended closures run and return their value
    #[test]
    fn test_suspend_returns_value() {
        let pm = ProgressManager::new(1, 1);

        let value = pm.suspend(|| 42);

        assert_eq!(value, 42);
        pm.finish();
    }

    // Tests an empty solve can be displayed
    #[test]
    fn test_zero_total() {
        let pm = ProgressManager::new(0, 0);

        pm.update(&DispatchProgress::default());
        pm.finish();
    }
}
