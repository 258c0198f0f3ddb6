use uuid::Uuid;

/// Remembers the last result the celebration fired for, so re-rendering the
/// same report never fires it twice.
#[derive(Debug, Default, Clone)]
pub struct CelebrationGate {
    last_processed: Option<Uuid>,
}

impl CelebrationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// True exactly once per distinct result id.
    pub fn should_fire(&mut self, result_id: Option<Uuid>) -> bool {
        match result_id {
            Some(id) if self.last_processed != Some(id) => {
                self.last_processed = Some(id);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_result() {
        let mut gate = CelebrationGate::new();
        let first = Uuid::new_v4();

        assert!(gate.should_fire(Some(first)));
        assert!(!gate.should_fire(Some(first)));
        assert!(!gate.should_fire(Some(first)));
        assert!(!gate.should_fire(None));

        let second = Uuid::new_v4();
        assert!(gate.should_fire(Some(second)));
        assert!(!gate.should_fire(Some(second)));
    }
}
