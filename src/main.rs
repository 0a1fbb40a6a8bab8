// Campus Graph - prints what each listing shows for a search term

use tracing_subscriber::EnvFilter;

use campus_graph::{
    app_state::AppState,
    config::Config,
    framework::FilterQuery,
    models::EntityType,
    services::{ConnectionTab, EventTab, JobTab, MembershipTab},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing; RUST_LOG wins over LOG_LEVEL
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Initialize application state
    let mut app = AppState::new(config)?;

    let text = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let query = FilterQuery::text(text.clone());
    let viewer = app.session.current_user().cloned();

    println!("Search: {:?}", text);
    match &viewer {
        Some(user) => println!("Signed in as {} ({})", user.name, user.university),
        None => println!("Not signed in"),
    }

    println!("\nStudents:");
    for user in app.service.discover_users(viewer.as_ref(), &query) {
        println!("  {} - {}, {} {}", user.name, user.major, user.university, user.graduation_year);
    }

    println!("\nStudy groups:");
    for group in app.service.study_groups(viewer.as_ref(), &query, MembershipTab::All) {
        println!("  {} [{}] {} members, {}", group.name, group.course, group.members.len(), group.visibility.as_str());
    }

    println!("\nClubs:");
    for club in app.service.clubs(&query, MembershipTab::All) {
        println!("  {} ({}) {} members", club.name, club.category, club.member_count);
    }

    println!("\nEvents:");
    let today = app.service.reference_date();
    for event in app.service.events(&query, EventTab::All) {
        let capacity = event
            .max_attendees
            .map(|max| format!("{}/{}", event.current_attendees, max))
            .unwrap_or_else(|| event.current_attendees.to_string());
        let ended = if event.has_ended(today) { " ended" } else { "" };
        println!(
            "  {} {} {} @ {} ({}){}",
            event.date, event.time, event.title, event.location, capacity, ended
        );
    }

    println!("\nJobs:");
    for job in app.service.jobs(&query, JobTab::All) {
        println!("  {} at {} - {} ({})", job.title, job.company, job.location, job.job_type.as_str());
    }

    if let Some(user) = &viewer {
        println!("\nConnections:");
        for connection in app.service.connections(user, &text, ConnectionTab::Connections) {
            println!("  {}", connection.counterpart(&user.id));
        }
        let pending = app.service.connections(user, &text, ConnectionTab::Pending);
        println!("Pending requests: {}", pending.len());

        println!("\nConversations:");
        for conversation in app.service.conversations(&text) {
            println!(
                "  {} ({} messages, {} unread)",
                conversation.participant_id,
                conversation.messages.len(),
                conversation.unread_count
            );
        }
    }

    println!("\nFilters:");
    for entity_type in [
        EntityType::User,
        EntityType::StudyGroup,
        EntityType::Club,
        EntityType::Event,
        EntityType::JobOpportunity,
    ] {
        for (field, values) in app.service.all_facets(entity_type)? {
            println!("  {}.{}: {}", entity_type.as_str(), field, values.join(", "));
        }
    }

    Ok(())
}
