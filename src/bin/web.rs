//! Single binary web server: draw state and operator intents via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! The roster is read from ROSTER_PATH (default data/teams.csv) at startup.

use actix_web::{
    get, post,
    web::{Data, Path},
    App, HttpResponse, HttpServer, Responder,
};
use group_draw_web::{
    load_roster, ConfirmOutcome, DrawEngine, DrawState, DrawTiming, ServerConfig, TeamId,
};
use serde::{Deserialize, Serialize};

/// Shared state: the engine plus where to reload the roster from.
struct AppContext {
    engine: DrawEngine,
    config: ServerConfig,
}

type AppState = Data<AppContext>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Draw state as sent to the client, with the derived slot count.
#[derive(Serialize)]
struct DrawView {
    #[serde(flatten)]
    state: DrawState,
    remaining_slots: usize,
    can_confirm: bool,
}

impl From<DrawState> for DrawView {
    fn from(state: DrawState) -> Self {
        Self {
            remaining_slots: state.remaining_slots(),
            can_confirm: state.can_confirm(),
            state,
        }
    }
}

/// Path segment: team id (e.g. /api/draw/seeds/{team_id}/toggle)
#[derive(Deserialize)]
struct TeamPath {
    team_id: TeamId,
}

fn view(engine: &DrawEngine) -> DrawView {
    DrawView::from(engine.snapshot())
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "group-draw-web",
    })
}

/// Current draw state. Clients poll this to follow the reveal.
#[get("/api/draw")]
async fn api_get_draw(state: AppState) -> HttpResponse {
    HttpResponse::Ok().json(view(&state.engine))
}

/// Toggle a seed team (SeedSelection only, saturating at 4). Rejections leave the state as is.
#[post("/api/draw/seeds/{team_id}/toggle")]
async fn api_toggle_seed(state: AppState, path: Path<TeamPath>) -> HttpResponse {
    state.engine.toggle_seed(path.team_id);
    HttpResponse::Ok().json(view(&state.engine))
}

/// Start the draw and run it in the background; poll GET /api/draw for progress.
/// The drawing guard is taken before responding, so a concurrent confirm gets 409.
#[post("/api/draw/confirm")]
async fn api_confirm_seeds(state: AppState) -> HttpResponse {
    let Some(cycle_id) = state.engine.begin_cycle() else {
        return HttpResponse::Conflict().json(serde_json::json!({
            "error": "Select exactly 4 seed teams before confirming, and wait for any running draw"
        }));
    };
    let engine = state.engine.clone();
    actix_web::rt::spawn(async move {
        match engine.run_cycle(cycle_id).await {
            Ok(ConfirmOutcome::Completed) => log::info!("Draw finished"),
            Ok(ConfirmOutcome::Rejected) => {
                log::warn!("Draw cycle {} was replaced before it ran", cycle_id)
            }
            Err(e) => log::warn!("Draw aborted: {}", e),
        }
    });
    HttpResponse::Accepted().json(view(&state.engine))
}

/// Reset to seed selection (not while drawing).
#[post("/api/draw/reset")]
async fn api_reset_draw(state: AppState) -> HttpResponse {
    if !state.engine.reset_draw() {
        return HttpResponse::Conflict()
            .json(serde_json::json!({ "error": "Cannot reset while a draw is in progress" }));
    }
    HttpResponse::Ok().json(view(&state.engine))
}

/// Re-read the roster file (manual retry after a failed load).
#[post("/api/roster/reload")]
async fn api_reload_roster(state: AppState) -> HttpResponse {
    match load_roster(&state.config.roster_path).await {
        Ok(teams) => {
            if !state.engine.load_roster(teams) {
                return HttpResponse::Conflict()
                    .json(serde_json::json!({ "error": "Cannot reload while a draw is in progress" }));
            }
            HttpResponse::Ok().json(view(&state.engine))
        }
        Err(e) => {
            state.engine.roster_failed(e.to_string());
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let engine = DrawEngine::new(DrawTiming::default());
    match load_roster(&config.roster_path).await {
        Ok(teams) => {
            engine.load_roster(teams);
        }
        Err(e) => engine.roster_failed(e.to_string()),
    }

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(AppContext { engine, config });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_get_draw)
            .service(api_toggle_seed)
            .service(api_confirm_seeds)
            .service(api_reset_draw)
            .service(api_reload_roster)
    })
    .bind(bind)?
    .run()
    .await
}
