// CampusService - the listing pages (discover, groups, clubs, events, careers,
// connections, messages) as filters over the stores plus relationship state

use chrono::NaiveDate;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::core::{EntityId, Timestamp};
use crate::data_seeder::Fixtures;
use crate::error::{AppError, AppResult};
use crate::framework::filter_engine::text_contains;
use crate::framework::FilterQuery;
use crate::infrastructure::id_generator::IdGenerator;
use crate::infrastructure::notifier::{ChangeNotifier, StateChange};
use crate::infrastructure::optimistic::{run_optimistic, Mutation};
use crate::infrastructure::traits::MutationSink;
use crate::infrastructure::EntityStore;
use crate::models::{
    Club, Connection, EntityType, Event, GroupMember, GroupRole, JobOpportunity, Message, NewClub,
    NewStudyGroup, RelationshipKind, RsvpStatus, StudyGroup, User, Visibility,
};
use crate::relationships::{MembershipSet, RelationshipTracker};
use crate::services::messaging::{Conversation, Inbox};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MembershipTab {
    #[default]
    All,
    Joined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventTab {
    #[default]
    All,
    /// Dated on or after the query's reference date
    Upcoming,
    /// Going or interested
    MyEvents,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobTab {
    #[default]
    All,
    Saved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionTab {
    #[default]
    Connections,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClubMembershipChange {
    pub joined: bool,
    pub member_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsvpChange {
    pub status: Option<RsvpStatus>,
    pub current_attendees: u32,
}

/// All mutable state behind the pages. Cloning it is the rollback snapshot.
#[derive(Debug, Clone)]
pub struct CampusState {
    pub users: EntityStore<User>,
    pub groups: EntityStore<StudyGroup>,
    pub clubs: EntityStore<Club>,
    pub events: EntityStore<Event>,
    pub jobs: EntityStore<JobOpportunity>,
    pub tracker: RelationshipTracker,
    pub inbox: Inbox,
}

impl CampusState {
    pub fn new(facet_capacity: usize) -> Self {
        Self {
            users: EntityStore::new(facet_capacity),
            groups: EntityStore::new(facet_capacity),
            clubs: EntityStore::new(facet_capacity),
            events: EntityStore::new(facet_capacity),
            jobs: EntityStore::new(facet_capacity),
            tracker: RelationshipTracker::new(),
            inbox: Inbox::new(),
        }
    }

    /// Replaces everything from a fixture bundle. Either every collection
    /// loads or the state is left untouched.
    pub fn load(&mut self, fixtures: Fixtures, viewer: Option<&EntityId>) -> AppResult<()> {
        let mut next = self.clone();
        next.users.load(fixtures.users)?;
        next.groups.load(fixtures.study_groups)?;
        next.clubs.load(fixtures.clubs)?;
        next.events.load(fixtures.events)?;
        next.jobs.load(fixtures.jobs)?;

        let mut tracker = RelationshipTracker::new();
        tracker
            .connections
            .load(fixtures.connections.into_iter().chain(fixtures.pending_requests));
        tracker.clubs = fixtures.joined_clubs.into_iter().collect();
        tracker.saved_jobs = fixtures.saved_jobs.into_iter().collect();
        tracker.rsvps = fixtures.rsvps.into_iter().collect();
        tracker.groups = match viewer {
            Some(viewer) => next
                .groups
                .iter()
                .filter(|g| g.has_member(viewer))
                .map(|g| g.id.clone())
                .collect(),
            None => MembershipSet::new(),
        };
        next.tracker = tracker;

        next.inbox = Inbox::new();
        if let Some(viewer) = viewer {
            next.inbox.load(viewer, fixtures.messages);
            for (participant, count) in &fixtures.unread_counts {
                if !next.inbox.set_unread(participant, *count) {
                    warn!("Unread count for {} has no conversation", participant);
                }
            }
        }

        *self = next;
        Ok(())
    }

    // Discover

    /// Users matching `query`, never including the viewer
    pub fn discover_users(&self, viewer: Option<&EntityId>, query: &FilterQuery) -> Vec<&User> {
        self.users
            .filter(query)
            .into_iter()
            .filter(|u| Some(&u.id) != viewer)
            .collect()
    }

    // Study groups

    pub fn study_groups(&self, viewer: Option<&User>, query: &FilterQuery, tab: MembershipTab) -> Vec<&StudyGroup> {
        let identity = viewer.map(|u| (&u.id, u.university.as_str()));
        self.groups
            .filter(query)
            .into_iter()
            .filter(|g| g.visible_to(identity))
            .filter(|g| match tab {
                MembershipTab::All => true,
                MembershipTab::Joined => self.tracker.groups.contains(&g.id),
            })
            .collect()
    }

    /// Prepends a new group with the creator as its admin and marks it joined
    pub fn create_group(
        &mut self,
        ids: &IdGenerator,
        creator: &User,
        form: NewStudyGroup,
        now: Timestamp,
    ) -> AppResult<StudyGroup> {
        if form.name.trim().is_empty() {
            return Err(AppError::Validation("group name is required".to_string()));
        }
        if form.course.trim().is_empty() {
            return Err(AppError::Validation("group course is required".to_string()));
        }

        let id = ids.next_id();
        let group = StudyGroup {
            members: vec![GroupMember {
                id: ids.next_id(),
                user_id: creator.id.clone(),
                group_id: id.clone(),
                role: GroupRole::Admin,
                joined_at: now,
            }],
            id,
            name: form.name.trim().to_string(),
            description: form.description,
            course: form.course.trim().to_string(),
            university: form.university,
            visibility: form.visibility,
            creator_id: creator.id.clone(),
            created_at: now,
        };
        self.groups.prepend(group.clone())?;
        self.tracker.groups.insert(group.id.clone());
        info!("Created study group {} ({})", group.id, group.name);
        Ok(group)
    }

    /// Joins or leaves a group; returns whether the viewer is now a member.
    /// Private groups and other universities' university-only groups cannot be joined.
    pub fn toggle_group_membership(
        &mut self,
        ids: &IdGenerator,
        viewer: &User,
        group_id: &EntityId,
        now: Timestamp,
    ) -> AppResult<bool> {
        let group = self
            .groups
            .get(group_id)
            .ok_or_else(|| AppError::NotFound(format!("study group {}", group_id)))?;
        let leaving = group.has_member(&viewer.id);
        if !leaving {
            match group.visibility {
                Visibility::Private => {
                    return Err(AppError::Validation(format!("study group {} is invite-only", group_id)))
                }
                Visibility::UniversityOnly if group.university != viewer.university => {
                    return Err(AppError::Validation(format!(
                        "study group {} is limited to {}",
                        group_id, group.university
                    )))
                }
                _ => {}
            }
        }

        let member_id = ids.next_id();
        self.groups.update(group_id, |g| {
            if leaving {
                g.members.retain(|m| m.user_id != viewer.id);
            } else {
                g.members.push(GroupMember {
                    id: member_id,
                    user_id: viewer.id.clone(),
                    group_id: g.id.clone(),
                    role: GroupRole::Member,
                    joined_at: now,
                });
            }
        })?;
        if leaving {
            self.tracker.groups.remove(group_id);
        } else {
            self.tracker.groups.insert(group_id.clone());
        }
        debug!("{} {} study group {}", viewer.id, if leaving { "left" } else { "joined" }, group_id);
        Ok(!leaving)
    }

    // Clubs

    pub fn clubs(&self, query: &FilterQuery, tab: MembershipTab) -> Vec<&Club> {
        self.clubs
            .filter(query)
            .into_iter()
            .filter(|c| match tab {
                MembershipTab::All => true,
                MembershipTab::Joined => self.tracker.clubs.contains(&c.id),
            })
            .collect()
    }

    /// Prepends a new active club with the creator as its only member
    pub fn create_club(&mut self, ids: &IdGenerator, form: NewClub, now: Timestamp) -> AppResult<Club> {
        if form.name.trim().is_empty() {
            return Err(AppError::Validation("club name is required".to_string()));
        }
        let club = Club {
            id: ids.next_id(),
            name: form.name.trim().to_string(),
            description: form.description,
            category: form.category,
            university: form.university,
            member_count: 1,
            is_active: true,
            tags: form.tags,
            meeting_schedule: form.meeting_schedule,
            contact_email: form.contact_email,
            created_at: now,
        };
        self.clubs.prepend(club.clone())?;
        self.tracker.clubs.insert(club.id.clone());
        info!("Created club {} ({})", club.id, club.name);
        Ok(club)
    }

    pub fn toggle_club_membership(&mut self, club_id: &EntityId) -> AppResult<ClubMembershipChange> {
        if !self.clubs.contains(club_id) {
            return Err(AppError::NotFound(format!("club {}", club_id)));
        }
        let joined = self.tracker.clubs.toggle(club_id);
        let delta = if joined { 1 } else { -1 };
        let member_count = self.clubs.update(club_id, |c| c.adjust_member_count(delta))?;
        Ok(ClubMembershipChange { joined, member_count })
    }

    // Events

    pub fn events(&self, query: &FilterQuery, tab: EventTab) -> Vec<&Event> {
        let today = query.reference_date();
        self.events
            .filter(query)
            .into_iter()
            .filter(|e| match tab {
                EventTab::All => true,
                EventTab::Upcoming => e.is_upcoming(today),
                EventTab::MyEvents => self.tracker.rsvps.is_engaged(&e.id),
            })
            .collect()
    }

    /// Toggles or overwrites the RSVP and moves the attendee counter.
    /// A full event refuses new `going` RSVPs. An event dated before `today`
    /// only lets the viewer clear the status they already hold.
    pub fn rsvp_event(&mut self, event_id: &EntityId, status: RsvpStatus, today: NaiveDate) -> AppResult<RsvpChange> {
        let event = self
            .events
            .get(event_id)
            .ok_or_else(|| AppError::NotFound(format!("event {}", event_id)))?;
        let held = self.tracker.rsvps.status(event_id);
        if event.has_ended(today) && held != Some(status) {
            return Err(AppError::Conflict(format!("event {} has ended", event_id)));
        }
        let already_going = held == Some(RsvpStatus::Going);
        if status == RsvpStatus::Going && !already_going && event.is_full() {
            return Err(AppError::Conflict(format!("event {} is full", event_id)));
        }

        let transition = self.tracker.rsvps.transition(event_id, status);
        let delta = transition.attendee_delta();
        let current_attendees = self.events.update(event_id, |e| e.adjust_attendees(delta))?;
        debug!(
            "RSVP {} -> {} ({} attending)",
            event_id,
            transition.current.map(|s| s.as_str()).unwrap_or("none"),
            current_attendees
        );
        Ok(RsvpChange {
            status: transition.current,
            current_attendees,
        })
    }

    /// Only revealed once the viewer is going to a virtual event
    pub fn meeting_link(&self, event_id: &EntityId) -> Option<&str> {
        self.events
            .get(event_id)?
            .meeting_link_for(self.tracker.rsvps.status(event_id))
    }

    // Careers

    pub fn jobs(&self, query: &FilterQuery, tab: JobTab) -> Vec<&JobOpportunity> {
        self.jobs
            .filter(query)
            .into_iter()
            .filter(|j| match tab {
                JobTab::All => true,
                JobTab::Saved => self.tracker.saved_jobs.contains(&j.id),
            })
            .collect()
    }

    pub fn toggle_saved_job(&mut self, job_id: &EntityId) -> AppResult<bool> {
        if !self.jobs.contains(job_id) {
            return Err(AppError::NotFound(format!("job {}", job_id)));
        }
        Ok(self.tracker.saved_jobs.toggle(job_id))
    }

    // Connections

    /// Connections or pending requests whose counterpart's name, major or
    /// university contains `text`
    pub fn connections(&self, viewer: &EntityId, text: &str, tab: ConnectionTab) -> Vec<&Connection> {
        let source = match tab {
            ConnectionTab::Connections => self.tracker.connections.accepted(),
            ConnectionTab::Pending => self.tracker.connections.pending(),
        };
        let needle = text.to_lowercase();
        source
            .iter()
            .filter(|c| {
                if needle.is_empty() {
                    return true;
                }
                self.users
                    .get(c.counterpart(viewer))
                    .map(|u| {
                        text_contains(&u.name, &needle)
                            || text_contains(&u.major, &needle)
                            || text_contains(&u.university, &needle)
                    })
                    .unwrap_or(false)
            })
            .collect()
    }

    pub fn accept_connection_request(&mut self, connection_id: &EntityId) -> Option<Connection> {
        self.tracker.accept_connection_request(connection_id).cloned()
    }

    pub fn decline_connection_request(&mut self, connection_id: &EntityId) -> bool {
        self.tracker.decline_connection_request(connection_id)
    }

    pub fn send_connection_request(
        &mut self,
        ids: &IdGenerator,
        viewer: &EntityId,
        to: &EntityId,
        now: Timestamp,
    ) -> AppResult<Connection> {
        if !self.users.contains(to) {
            return Err(AppError::NotFound(format!("user {}", to)));
        }
        let connection = self
            .tracker
            .connections
            .request(ids.next_id(), viewer, to, now)?
            .clone();
        info!("Sent connection request {} to {}", connection.id, to);
        Ok(connection)
    }

    // Messages

    pub fn conversations(&self, text: &str) -> Vec<&Conversation> {
        self.inbox.search(text, &self.users)
    }

    pub fn send_message(
        &mut self,
        ids: &IdGenerator,
        viewer: &EntityId,
        to: Option<&EntityId>,
        content: &str,
        now: Timestamp,
    ) -> AppResult<Message> {
        let to = to.ok_or_else(|| AppError::BadRequest("no conversation selected".to_string()))?;
        if to == viewer {
            return Err(AppError::BadRequest("cannot message yourself".to_string()));
        }
        if !self.users.contains(to) {
            return Err(AppError::NotFound(format!("user {}", to)));
        }
        self.inbox.send(ids.next_id(), viewer, to, content, now)
    }
}

/// Owns the state, the id source and the change channel. Every mutation
/// publishes a [`StateChange`].
pub struct CampusService {
    state: CampusState,
    ids: IdGenerator,
    notifier: ChangeNotifier,
    today: Option<NaiveDate>,
}

impl CampusService {
    pub fn new(config: &Config) -> Self {
        Self::with_id_generator(config, IdGenerator::default())
    }

    pub fn with_id_generator(config: &Config, ids: IdGenerator) -> Self {
        Self {
            state: CampusState::new(config.cache.facet_capacity),
            ids,
            notifier: ChangeNotifier::new(),
            today: None,
        }
    }

    /// Pins the date RSVPs are checked against. `None` follows the UTC clock.
    pub fn set_reference_date(&mut self, today: Option<NaiveDate>) {
        self.today = today;
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Timestamp::now().date())
    }

    pub fn state(&self) -> &CampusState {
        &self.state
    }

    pub fn subscribe(&self) -> watch::Receiver<StateChange> {
        self.notifier.subscribe()
    }

    pub fn load_fixtures(&mut self, fixtures: Fixtures, viewer: Option<&EntityId>) -> AppResult<()> {
        self.state.load(fixtures, viewer)?;
        info!(
            "Loaded campus data: {} users, {} groups, {} clubs, {} events, {} jobs",
            self.state.users.len(),
            self.state.groups.len(),
            self.state.clubs.len(),
            self.state.events.len(),
            self.state.jobs.len()
        );
        self.notifier.notify(None);
        Ok(())
    }

    /// Distinct selector values for one filterable field of a listing
    pub fn facets(&mut self, entity_type: EntityType, field: &str) -> AppResult<Vec<String>> {
        match entity_type {
            EntityType::User => Ok(self.state.users.facets(field)),
            EntityType::StudyGroup => Ok(self.state.groups.facets(field)),
            EntityType::Club => Ok(self.state.clubs.facets(field)),
            EntityType::Event => Ok(self.state.events.facets(field)),
            EntityType::JobOpportunity => Ok(self.state.jobs.facets(field)),
            EntityType::Connection | EntityType::Message => Err(AppError::BadRequest(format!(
                "{} listings have no filter selectors",
                entity_type.as_str()
            ))),
        }
    }

    /// Every selector of a listing with its values, in selector order
    pub fn all_facets(&mut self, entity_type: EntityType) -> AppResult<Vec<(&'static str, Vec<String>)>> {
        match entity_type {
            EntityType::User => Ok(self.state.users.all_facets()),
            EntityType::StudyGroup => Ok(self.state.groups.all_facets()),
            EntityType::Club => Ok(self.state.clubs.all_facets()),
            EntityType::Event => Ok(self.state.events.all_facets()),
            EntityType::JobOpportunity => Ok(self.state.jobs.all_facets()),
            EntityType::Connection | EntityType::Message => Err(AppError::BadRequest(format!(
                "{} listings have no filter selectors",
                entity_type.as_str()
            ))),
        }
    }

    pub fn discover_users(&self, viewer: Option<&User>, query: &FilterQuery) -> Vec<&User> {
        self.state.discover_users(viewer.map(|u| &u.id), query)
    }

    pub fn study_groups(&self, viewer: Option<&User>, query: &FilterQuery, tab: MembershipTab) -> Vec<&StudyGroup> {
        self.state.study_groups(viewer, query, tab)
    }

    pub fn create_group(&mut self, creator: &User, form: NewStudyGroup) -> AppResult<StudyGroup> {
        let group = self.state.create_group(&self.ids, creator, form, Timestamp::now())?;
        self.notifier.notify(Some(EntityType::StudyGroup));
        Ok(group)
    }

    pub fn toggle_group_membership(&mut self, viewer: &User, group_id: &EntityId) -> AppResult<bool> {
        let joined = self
            .state
            .toggle_group_membership(&self.ids, viewer, group_id, Timestamp::now())?;
        self.notifier.notify(Some(EntityType::StudyGroup));
        Ok(joined)
    }

    pub fn clubs(&self, query: &FilterQuery, tab: MembershipTab) -> Vec<&Club> {
        self.state.clubs(query, tab)
    }

    pub fn create_club(&mut self, form: NewClub) -> AppResult<Club> {
        let club = self.state.create_club(&self.ids, form, Timestamp::now())?;
        self.notifier.notify(Some(EntityType::Club));
        Ok(club)
    }

    pub fn toggle_club_membership(&mut self, club_id: &EntityId) -> AppResult<ClubMembershipChange> {
        let change = self.state.toggle_club_membership(club_id)?;
        self.notifier.notify(Some(EntityType::Club));
        Ok(change)
    }

    pub fn events(&self, query: &FilterQuery, tab: EventTab) -> Vec<&Event> {
        self.state.events(query, tab)
    }

    pub fn rsvp_event(&mut self, event_id: &EntityId, status: RsvpStatus) -> AppResult<RsvpChange> {
        let today = self.reference_date();
        let change = self.state.rsvp_event(event_id, status, today)?;
        self.notifier.notify(Some(EntityType::Event));
        Ok(change)
    }

    pub fn meeting_link(&self, event_id: &EntityId) -> Option<&str> {
        self.state.meeting_link(event_id)
    }

    pub fn jobs(&self, query: &FilterQuery, tab: JobTab) -> Vec<&JobOpportunity> {
        self.state.jobs(query, tab)
    }

    pub fn toggle_saved_job(&mut self, job_id: &EntityId) -> AppResult<bool> {
        let saved = self.state.toggle_saved_job(job_id)?;
        self.notifier.notify(Some(EntityType::JobOpportunity));
        Ok(saved)
    }

    pub fn connections(&self, viewer: &User, text: &str, tab: ConnectionTab) -> Vec<&Connection> {
        self.state.connections(&viewer.id, text, tab)
    }

    /// Unknown or already-handled ids are a silent no-op returning `None`
    pub fn accept_connection_request(&mut self, connection_id: &EntityId) -> Option<Connection> {
        let accepted = self.state.accept_connection_request(connection_id);
        if accepted.is_some() {
            self.notifier.notify(Some(EntityType::Connection));
        }
        accepted
    }

    pub fn decline_connection_request(&mut self, connection_id: &EntityId) -> bool {
        let removed = self.state.decline_connection_request(connection_id);
        if removed {
            self.notifier.notify(Some(EntityType::Connection));
        }
        removed
    }

    pub fn send_connection_request(&mut self, viewer: &User, to: &EntityId) -> AppResult<Connection> {
        let connection = self
            .state
            .send_connection_request(&self.ids, &viewer.id, to, Timestamp::now())?;
        self.notifier.notify(Some(EntityType::Connection));
        Ok(connection)
    }

    pub fn conversations(&self, text: &str) -> Vec<&Conversation> {
        self.state.conversations(text)
    }

    /// Marks the conversation read and returns its history, oldest first
    pub fn open_conversation(&mut self, participant: &EntityId) -> AppResult<Vec<Message>> {
        let history = self.state.inbox.open(participant)?.to_vec();
        self.notifier.notify(Some(EntityType::Message));
        Ok(history)
    }

    pub fn send_message(&mut self, viewer: &User, to: Option<&EntityId>, content: &str) -> AppResult<Message> {
        let message = self
            .state
            .send_message(&self.ids, &viewer.id, to, content, Timestamp::now())?;
        self.notifier.notify(Some(EntityType::Message));
        Ok(message)
    }

    /// Delivers an incoming message. Returns the viewer's new unread total.
    pub fn receive_message(&mut self, viewer: &User, message: Message) -> AppResult<u32> {
        if !self.state.users.contains(&message.sender_id) {
            return Err(AppError::NotFound(format!("user {}", message.sender_id)));
        }
        self.state.inbox.receive(&viewer.id, message)?;
        self.notifier.notify(Some(EntityType::Message));
        Ok(self.state.inbox.unread_total())
    }

    /// Applies `apply` locally and confirms it through `sink`. A rejected
    /// commit restores the previous state and still notifies subscribers so
    /// they re-render the rolled-back values.
    pub async fn apply_synced<T, F>(
        &mut self,
        sink: &dyn MutationSink,
        scope: Option<EntityType>,
        apply: F,
    ) -> AppResult<T>
    where
        F: FnOnce(&mut CampusState, &IdGenerator) -> AppResult<(T, Mutation)>,
    {
        let ids = &self.ids;
        let result = run_optimistic(&mut self.state, sink, |state| apply(state, ids)).await;
        match &result {
            Ok(_) => {
                self.notifier.notify(scope);
            }
            Err(AppError::SyncFailed(reason)) => {
                warn!("Sync rejected, state rolled back: {}", reason);
                self.notifier.notify(None);
            }
            Err(_) => {}
        }
        result
    }

    pub async fn toggle_club_membership_synced(
        &mut self,
        sink: &dyn MutationSink,
        club_id: &EntityId,
    ) -> AppResult<ClubMembershipChange> {
        self.apply_synced(sink, Some(EntityType::Club), |state, _| {
            let change = state.toggle_club_membership(club_id)?;
            let mutation = Mutation::Membership {
                relationship: RelationshipKind::ClubMembership,
                entity_id: club_id.clone(),
                joined: change.joined,
            };
            Ok((change, mutation))
        })
        .await
    }

    pub async fn rsvp_event_synced(
        &mut self,
        sink: &dyn MutationSink,
        event_id: &EntityId,
        status: RsvpStatus,
    ) -> AppResult<RsvpChange> {
        let today = self.reference_date();
        self.apply_synced(sink, Some(EntityType::Event), |state, _| {
            let change = state.rsvp_event(event_id, status, today)?;
            let mutation = Mutation::Rsvp {
                event_id: event_id.clone(),
                status: change.status,
            };
            Ok((change, mutation))
        })
        .await
    }

    pub async fn accept_connection_request_synced(
        &mut self,
        sink: &dyn MutationSink,
        connection_id: &EntityId,
    ) -> AppResult<Option<Connection>> {
        if !self.state.tracker.connections.is_pending(connection_id) {
            return Ok(None);
        }
        self.apply_synced(sink, Some(EntityType::Connection), |state, _| {
            let accepted = state.accept_connection_request(connection_id);
            let mutation = Mutation::AcceptConnection {
                connection_id: connection_id.clone(),
            };
            Ok((accepted, mutation))
        })
        .await
    }

    pub async fn decline_connection_request_synced(
        &mut self,
        sink: &dyn MutationSink,
        connection_id: &EntityId,
    ) -> AppResult<bool> {
        if !self.state.tracker.connections.is_pending(connection_id) {
            return Ok(false);
        }
        self.apply_synced(sink, Some(EntityType::Connection), |state, _| {
            let removed = state.decline_connection_request(connection_id);
            let mutation = Mutation::DeclineConnection {
                connection_id: connection_id.clone(),
            };
            Ok((removed, mutation))
        })
        .await
    }

    pub async fn send_connection_request_synced(
        &mut self,
        sink: &dyn MutationSink,
        viewer: &User,
        to: &EntityId,
    ) -> AppResult<Connection> {
        self.apply_synced(sink, Some(EntityType::Connection), |state, ids| {
            let connection = state.send_connection_request(ids, &viewer.id, to, Timestamp::now())?;
            let mutation = Mutation::RequestConnection {
                connection: connection.clone(),
            };
            Ok((connection, mutation))
        })
        .await
    }

    pub async fn create_group_synced(
        &mut self,
        sink: &dyn MutationSink,
        creator: &User,
        form: NewStudyGroup,
    ) -> AppResult<StudyGroup> {
        self.apply_synced(sink, Some(EntityType::StudyGroup), |state, ids| {
            let group = state.create_group(ids, creator, form, Timestamp::now())?;
            let mutation = Mutation::CreateGroup { group: group.clone() };
            Ok((group, mutation))
        })
        .await
    }

    pub async fn create_club_synced(&mut self, sink: &dyn MutationSink, form: NewClub) -> AppResult<Club> {
        self.apply_synced(sink, Some(EntityType::Club), |state, ids| {
            let club = state.create_club(ids, form, Timestamp::now())?;
            let mutation = Mutation::CreateClub { club: club.clone() };
            Ok((club, mutation))
        })
        .await
    }

    pub async fn send_message_synced(
        &mut self,
        sink: &dyn MutationSink,
        viewer: &User,
        to: Option<&EntityId>,
        content: &str,
    ) -> AppResult<Message> {
        self.apply_synced(sink, Some(EntityType::Message), |state, ids| {
            let message = state.send_message(ids, &viewer.id, to, content, Timestamp::now())?;
            let mutation = Mutation::SendMessage {
                message: message.clone(),
            };
            Ok((message, mutation))
        })
        .await
    }
}
