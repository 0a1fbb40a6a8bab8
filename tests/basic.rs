use chrono::NaiveDate;

use campus_graph::{
    config::Config,
    core::EntityId,
    data_seeder::Fixtures,
    framework::{filter, FilterQuery},
    infrastructure::IdGenerator,
    models::{RsvpStatus, User},
    relationships::RelationshipTracker,
    services::{CampusService, ConnectionTab, EventTab},
};

fn fixtures() -> Fixtures {
    Fixtures::from_json(include_str!("../data/fixtures.json")).unwrap()
}

fn service() -> (CampusService, User) {
    let fixtures = fixtures();
    let viewer = fixtures.user(&EntityId::from("1")).cloned().unwrap();
    let mut service = CampusService::with_id_generator(&Config::default(), IdGenerator::sequential("t"));
    service.load_fixtures(fixtures, Some(&viewer.id)).unwrap();
    service.set_reference_date(NaiveDate::from_ymd_opt(2024, 2, 1));
    (service, viewer)
}

fn ids<'a, T: 'a>(items: impl IntoIterator<Item = &'a T>, id: impl Fn(&T) -> &EntityId) -> Vec<String> {
    items.into_iter().map(|item| id(item).to_string()).collect()
}

#[test]
fn test_empty_query_is_identity() {
    let users = fixtures().users;
    let result = filter(&users, &FilterQuery::new());
    assert_eq!(result.len(), users.len());
    assert!(result.iter().zip(users.iter()).all(|(a, b)| a.id == b.id));
}

#[test]
fn test_text_query_is_case_insensitive() {
    let users = fixtures().users;
    let upper = ids(filter(&users, &FilterQuery::text("STANFORD")), |u: &User| &u.id);
    let lower = ids(filter(&users, &FilterQuery::text("stanford")), |u: &User| &u.id);
    assert_eq!(upper, lower);
    assert_eq!(upper, vec!["1", "2", "3"]);
}

#[test]
fn test_university_predicate_with_text() {
    let users = fixtures().users;
    let query = FilterQuery::text("math").with("university", "MIT");
    let found = filter(&users, &query);
    assert_eq!(ids(found.iter().copied(), |u: &User| &u.id), vec!["5"]);
    assert!(found.iter().all(|u| u.university == "MIT"));
}

#[test]
fn test_rsvp_going_twice_restores_attendees() {
    let (mut service, _) = service();
    let e1 = EntityId::from("E1");

    let first = service.rsvp_event(&e1, RsvpStatus::Going).unwrap();
    assert_eq!(first.status, Some(RsvpStatus::Going));
    assert_eq!(first.current_attendees, 68);

    let second = service.rsvp_event(&e1, RsvpStatus::Going).unwrap();
    assert_eq!(second.status, None);
    assert_eq!(second.current_attendees, 67);
}

#[test]
fn test_rsvp_switch_between_going_and_interested() {
    let (mut service, _) = service();
    let e1 = EntityId::from("E1");
    service.rsvp_event(&e1, RsvpStatus::Going).unwrap();
    let change = service.rsvp_event(&e1, RsvpStatus::Interested).unwrap();
    assert_eq!(change.status, Some(RsvpStatus::Interested));
    assert_eq!(change.current_attendees, 67);
}

#[test]
fn test_accept_then_decline_is_noop() {
    let (mut service, viewer) = service();
    let r1 = EntityId::from("R1");

    let accepted = service.accept_connection_request(&r1).unwrap();
    assert_eq!(accepted.id, r1);
    assert!(service.connections(&viewer, "", ConnectionTab::Pending).is_empty());
    assert_eq!(service.connections(&viewer, "", ConnectionTab::Connections).len(), 3);

    assert!(!service.decline_connection_request(&r1));
    assert_eq!(service.connections(&viewer, "", ConnectionTab::Connections).len(), 3);
}

#[test]
fn test_club_toggle_round_trip() {
    let (mut service, _) = service();
    let c1 = EntityId::from("C1");

    let joined = service.toggle_club_membership(&c1).unwrap();
    assert!(joined.joined);
    assert_eq!(joined.member_count, 246);

    let left = service.toggle_club_membership(&c1).unwrap();
    assert!(!left.joined);
    assert_eq!(left.member_count, 245);
}

#[test]
fn test_counters_never_go_negative() {
    let (mut service, _) = service();
    // C4 starts with zero members; leaving after a join must stop at zero
    let c4 = EntityId::from("C4");
    service.toggle_club_membership(&c4).unwrap();
    service.toggle_club_membership(&c4).unwrap();
    assert_eq!(service.state().clubs.get(&c4).unwrap().member_count, 0);

    let mut club = service.state().clubs.get(&c4).unwrap().clone();
    assert_eq!(club.adjust_member_count(-1), 0);

    let mut tracker = RelationshipTracker::new();
    let e2 = EntityId::from("E2");
    tracker.set_rsvp(&e2, RsvpStatus::NotGoing);
    assert!(!tracker.rsvps.is_engaged(&e2));
    let change = service.rsvp_event(&e2, RsvpStatus::NotGoing).unwrap();
    assert_eq!(change.current_attendees, 23);
}

#[test]
fn test_default_event_listing_shows_every_fixture_event() {
    let (mut service, _) = service();
    // a clock far past the fixture dates
    service.set_reference_date(NaiveDate::from_ymd_opt(2030, 1, 1));
    let listed = ids(service.events(&FilterQuery::new(), EventTab::All), |e| &e.id);
    assert_eq!(listed, vec!["E1", "E2", "E3", "E4"]);
    assert!(service
        .events(&FilterQuery::new(), EventTab::All)
        .iter()
        .all(|e| e.has_ended(service.reference_date())));
}
