use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::Modify;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "One-Line-A-Day API",
        version = "1.0.0",
        description = "Backend API for a two-person shared journal"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        // Health
        crate::handlers::health::health_check,

        // Entries
        crate::handlers::entries_handler::get_entries,
        crate::handlers::entries_handler::get_todays_entries,
        crate::handlers::entries_handler::create_entry,
        crate::handlers::entries_handler::delete_entry,

        // Stats
        crate::handlers::stats_handler::get_stats,

        // Pairs
        crate::handlers::pair_handler::get_pair,
        crate::handlers::pair_handler::provision,

        // Prompts
        crate::handlers::prompts_handler::get_moods,
        crate::handlers::prompts_handler::get_golden_prompt,
    ),
    components(
        schemas(
            crate::models::Entry,
            crate::models::Author,
            crate::models::Mood,
            crate::models::MoodBucket,
            crate::models::MoodInfo,
            crate::models::CreateEntryInput,
            crate::models::EntryMutationResponse,
            crate::models::PairResponse,
            crate::models::ProvisionRequest,
            crate::models::ProvisionResponse,
            crate::journal::Dashboard,
            crate::journal::CalendarDay,
            crate::journal::MoodCalendar,
            crate::journal::MonthCount,
            crate::journal::WordCount,
            crate::handlers::prompts_handler::GoldenPromptResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check"),
        (name = "entries", description = "Journal entries"),
        (name = "stats", description = "Streaks and statistics"),
        (name = "pairs", description = "Pair discovery and provisioning"),
        (name = "prompts", description = "Moods and golden prompts"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}
