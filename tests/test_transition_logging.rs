use std::time::Duration;

use log::Level;
use logtest::Logger;

use metro_connectivity::domain::connectivity::connectivity_request::ConnectivityRequest;
use metro_connectivity::domain::connectivity::state::ConnectivityState;
use metro_connectivity::domain::network::bandwidth::Bandwidth;
use metro_connectivity::domain::network::connect_point::ConnectPoint;
use metro_connectivity::domain::network::link::{Link, Path};
use metro_connectivity::domain::utils::id::ConnectivityId;

// logtest installs a process wide logger, so this file holds a single test.
#[test]
fn test_rejected_transition_is_logged_as_warning() {
    let mut logger = Logger::start();

    let path = Path::new(vec![Link::new(ConnectPoint::new("s1", 1), ConnectPoint::new("s2", 1))]).unwrap();
    let mut request = ConnectivityRequest::new(ConnectivityId::new("metro-log"), &path, Bandwidth::gbps(1), Duration::from_millis(1));

    assert!(request.request_transition(ConnectivityState::Installing));
    assert!(!request.request_transition(ConnectivityState::Withdrawn));

    let mut warnings = Vec::new();
    while let Some(record) = logger.pop() {
        if record.level() == Level::Warn {
            warnings.push(record.args().to_string());
        }
    }

    assert_eq!(warnings.len(), 1, "expected one warning, got {:?}", warnings);
    assert!(warnings[0].contains("metro-log"));
    assert!(warnings[0].contains("INSTALLING -> WITHDRAWN"));
}
