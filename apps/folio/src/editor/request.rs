/// Progress of one network operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState<T> {
    #[default]
    Idle,
    InFlight,
    Succeeded(T),
    Failed(String),
}

impl<T> RequestState<T> {
    /// Controls bound to this operation are disabled while it runs.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, RequestState::InFlight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_in_flight_blocks() {
        let idle: RequestState<String> = RequestState::default();
        assert_eq!(idle, RequestState::Idle);
        assert!(!idle.is_in_flight());

        assert!(RequestState::<String>::InFlight.is_in_flight());
        assert!(!RequestState::Succeeded("abc".to_string()).is_in_flight());
        assert!(!RequestState::<()>::Failed("nope".into()).is_in_flight());
    }
}
