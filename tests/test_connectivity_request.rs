use std::time::Duration;

use metro_connectivity::domain::connectivity::connectivity_request::ConnectivityRequest;
use metro_connectivity::domain::connectivity::realizing_link::RealizingLink;
use metro_connectivity::domain::connectivity::state::ConnectivityState::{self, *};
use metro_connectivity::domain::network::bandwidth::Bandwidth;
use metro_connectivity::domain::network::connect_point::ConnectPoint;
use metro_connectivity::domain::network::link::{Link, Path};
use metro_connectivity::domain::utils::id::{ConnectivityId, ReservationHandle};

fn cp(device: &str, port: u32) -> ConnectPoint {
    ConnectPoint::new(device, port)
}

fn three_hop_path() -> Path {
    Path::new(vec![
        Link::new(cp("s1", 1), cp("s2", 1)),
        Link::new(cp("s2", 2), cp("s3", 1)),
        Link::new(cp("s3", 2), cp("s4", 1)),
    ])
    .unwrap()
}

fn new_request() -> ConnectivityRequest {
    ConnectivityRequest::new(ConnectivityId::new("metro-1"), &three_hop_path(), Bandwidth::gbps(10), Duration::from_millis(5))
}

fn realizing(src: ConnectPoint, dst: ConnectPoint) -> RealizingLink {
    RealizingLink::new(src, dst, Bandwidth::gbps(100))
}

/// Drives a fresh request into `state` along valid edges.
fn request_in(state: ConnectivityState) -> ConnectivityRequest {
    let mut request = new_request();
    let route: &[ConnectivityState] = match state {
        Created => &[],
        Installing => &[Installing],
        Installed => &[Installing, Installed],
        Withdrawing => &[Installing, Installed, Withdrawing],
        Withdrawn => &[Installing, Installed, Withdrawing, Withdrawn],
        Failed => &[Failed],
    };

    for step in route {
        assert!(request.request_transition(*step), "setup transition to {} failed", step);
    }
    assert_eq!(request.state(), state);
    request
}

#[test]
fn test_new_request_captures_parameters() {
    let request = new_request();

    assert_eq!(request.id(), &ConnectivityId::new("metro-1"));
    assert_eq!(request.links().len(), 3);
    assert_eq!(request.bandwidth(), Bandwidth::gbps(10));
    assert_eq!(request.latency(), Duration::from_millis(5));
    assert_eq!(request.state(), Created);
    assert!(request.optical_capacity().is_none());
    assert!(request.reservation_handle().is_none());
    assert!(request.realizing_links().is_empty());
}

#[test]
fn test_links_are_copied_from_path() {
    let path = three_hop_path();
    let request = ConnectivityRequest::new(ConnectivityId::new("metro-1"), &path, Bandwidth::gbps(10), Duration::from_millis(5));
    drop(path);

    assert_eq!(request.links()[0], Link::new(cp("s1", 1), cp("s2", 1)));
    assert_eq!(request.links()[2], Link::new(cp("s3", 2), cp("s4", 1)));
}

#[test]
fn test_transition_follows_table_for_every_pair() {
    for from in ConnectivityState::ALL {
        for to in ConnectivityState::ALL {
            let mut request = request_in(from);
            let accepted = request.request_transition(to);

            assert_eq!(accepted, from.can_transition_to(to), "{} -> {}", from, to);
            let expected = if accepted { to } else { from };
            assert_eq!(request.state(), expected, "state after {} -> {}", from, to);
        }
    }
}

#[test]
fn test_withdrawn_has_no_outgoing_transition() {
    let mut request = request_in(Withdrawn);

    for target in ConnectivityState::ALL {
        assert!(!request.request_transition(target), "WITHDRAWN -> {} must be rejected", target);
        assert_eq!(request.state(), Withdrawn);
    }
}

#[test]
fn test_repeated_failure_is_idempotent() {
    let mut request = request_in(Failed);

    for _ in 0..5 {
        assert!(request.request_transition(Failed));
        assert_eq!(request.state(), Failed);
    }
}

#[test]
fn test_failed_request_can_retry_install_or_withdraw() {
    let mut retry_install = request_in(Failed);
    assert!(retry_install.request_transition(Installing));

    let mut retry_withdraw = request_in(Failed);
    assert!(retry_withdraw.request_transition(Withdrawing));
    assert!(retry_withdraw.request_transition(Withdrawn));
}

#[test]
fn test_add_then_remove_leaves_set_empty_and_flag_untouched() {
    let mut request = new_request();
    let link = realizing(cp("s1", 1), cp("s2", 1));

    assert!(request.add_realizing_link(link.clone()));
    request.set_link_established(&cp("s1", 1), &cp("s2", 1));

    let removed = request.remove_realizing_link(&link).expect("link should have been present");

    assert!(request.realizing_links().is_empty());
    assert!(removed.is_established(), "removal must not reset the established flag");
}

#[test]
fn test_duplicate_add_is_a_no_op() {
    let mut request = new_request();
    let link = realizing(cp("s1", 1), cp("s2", 1));

    assert!(request.add_realizing_link(link.clone()));
    request.set_link_established(&cp("s1", 1), &cp("s2", 1));
    assert!(!request.add_realizing_link(link));

    let links = request.realizing_links();
    assert_eq!(links.len(), 1);
    assert!(links[0].is_established(), "the present entry is kept");
}

#[test]
fn test_removing_absent_link_is_a_no_op() {
    let mut request = new_request();
    request.add_realizing_link(realizing(cp("s1", 1), cp("s2", 1)));

    assert!(request.remove_realizing_link(&realizing(cp("s3", 2), cp("s4", 1))).is_none());
    assert_eq!(request.realizing_link_count(), 1);
}

#[test]
fn test_snapshot_does_not_follow_later_changes() {
    let mut request = new_request();
    request.add_realizing_link(realizing(cp("s1", 1), cp("s2", 1)));

    let snapshot = request.realizing_links();
    request.set_link_established(&cp("s1", 1), &cp("s2", 1));
    request.add_realizing_link(realizing(cp("s3", 2), cp("s4", 1)));

    assert_eq!(snapshot.len(), 1);
    assert!(!snapshot[0].is_established());
    assert_eq!(request.realizing_links().len(), 2);
}

#[test]
fn test_aggregation_over_two_links() {
    let mut request = new_request();
    request.add_realizing_link(realizing(cp("s1", 1), cp("s2", 1)));
    request.add_realizing_link(realizing(cp("s3", 2), cp("s4", 1)));

    assert!(!request.is_all_realizing_links_established());
    assert!(request.is_no_realizing_link_established());

    request.set_link_established(&cp("s1", 1), &cp("s2", 1));
    assert!(!request.is_all_realizing_links_established());
    assert!(!request.is_no_realizing_link_established());

    request.set_link_established(&cp("s3", 2), &cp("s4", 1));
    assert!(request.is_all_realizing_links_established());
    assert!(!request.is_no_realizing_link_established());

    request.set_link_removed(&cp("s1", 1), &cp("s2", 1));
    request.set_link_removed(&cp("s3", 2), &cp("s4", 1));
    assert!(!request.is_all_realizing_links_established());
    assert!(request.is_no_realizing_link_established());
}

#[test]
fn test_empty_set_is_not_all_established() {
    let request = new_request();

    assert!(!request.is_all_realizing_links_established());
    assert!(request.is_no_realizing_link_established());
}

#[test]
fn test_signal_for_untracked_link_is_ignored() {
    let mut request = new_request();
    request.add_realizing_link(realizing(cp("s1", 1), cp("s2", 1)));

    request.set_link_established(&cp("s9", 1), &cp("s2", 1));
    request.set_link_removed(&cp("s9", 1), &cp("s2", 1));
    // reverse direction is a different link
    request.set_link_established(&cp("s2", 1), &cp("s1", 1));

    assert_eq!(request.realizing_link_count(), 1);
    assert!(request.is_no_realizing_link_established());
    assert!(request.realizing_link(&cp("s9", 1), &cp("s2", 1)).is_none());
}

#[test]
fn test_capacity_and_reservation_handle_overwrite() {
    let mut request = new_request();

    request.set_optical_capacity(Bandwidth::gbps(100));
    request.set_optical_capacity(Bandwidth::gbps(40));
    request.set_reservation_handle(ReservationHandle::new("intent-1"));

    assert_eq!(request.optical_capacity(), Some(Bandwidth::gbps(40)));
    assert_eq!(request.reservation_handle(), Some(&ReservationHandle::new("intent-1")));
    assert_eq!(request.state(), Created, "bookkeeping does not touch the lifecycle");
}

#[test]
fn test_full_lifecycle_scenario() {
    let mut request = new_request();
    let first = (cp("s1", 1), cp("s2", 1));
    let second = (cp("s3", 2), cp("s4", 1));

    assert!(request.request_transition(Installing));
    request.add_realizing_link(realizing(first.0.clone(), first.1.clone()));
    request.add_realizing_link(realizing(second.0.clone(), second.1.clone()));

    request.set_link_established(&first.0, &first.1);
    request.set_link_established(&second.0, &second.1);
    assert!(request.is_all_realizing_links_established());
    assert!(request.request_transition(Installed));

    assert!(!request.request_transition(Created));
    assert_eq!(request.state(), Installed);

    assert!(request.request_transition(Withdrawing));
    request.set_link_removed(&first.0, &first.1);
    request.set_link_removed(&second.0, &second.1);
    assert!(request.is_no_realizing_link_established());
    assert!(request.request_transition(Withdrawn));

    for target in ConnectivityState::ALL {
        assert!(!request.request_transition(target));
    }
}
