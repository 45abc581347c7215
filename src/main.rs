use std::{process, sync::Arc, time::Duration};

use a2ui_content::{
    application::{
        agent::{GeminiConfig, GeminiGenerator, SurfaceGenerator, component_schema},
        article_view::ArticleViewService,
        error::AppError,
        markdown::markdown_service,
        surface::{ChildPlacement, SurfaceRenderer, SurfaceViewState},
        transport::{HttpSurfaceTransport, InProcessTransport, SurfaceTransport},
    },
    config,
    domain::{
        lightbox::GalleryFocus,
        surface::{SurfaceEnvelope, SurfaceUpdate},
    },
    infra::{
        content_store::FsArticleSource,
        error::InfraError,
        http::{self, ApiState, HttpState, RouterState},
        telemetry,
    },
};
use tokio::sync::Notify;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Render(args) => run_render(args),
        config::Command::Schema => run_schema(),
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let generator: Arc<dyn SurfaceGenerator> = Arc::new(
        GeminiGenerator::new(GeminiConfig::from(&settings.agent))
            .map_err(|err| AppError::unexpected(format!("failed to build agent client: {err}")))?,
    );
    if settings.agent.api_key.is_none() {
        warn!(
            target = "a2ui::serve",
            "No agent API key configured; render requests will fail and pages will use the fallback layout"
        );
    }

    let transport: Arc<dyn SurfaceTransport> = match settings.transport.endpoint.as_ref() {
        Some(endpoint) => {
            let transport = HttpSurfaceTransport::new(endpoint, settings.transport.timeout)
                .map_err(|err| AppError::unexpected(format!("invalid transport endpoint: {err}")))?;
            info!(
                target = "a2ui::serve",
                endpoint = %transport.render_url(),
                "Page shell uses the HTTP transport"
            );
            Arc::new(transport)
        }
        None => Arc::new(InProcessTransport::new(Arc::clone(&generator))),
    };

    let source = Arc::new(FsArticleSource::new(settings.content.directory.clone()));
    let articles = Arc::new(ArticleViewService::new(
        source,
        transport,
        SurfaceRenderer::new(markdown_service()),
        settings.cache.surface_capacity,
    ));

    let router = http::build_router(RouterState {
        http: HttpState { articles },
        api: ApiState::new(generator),
    });

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    info!(
        target = "a2ui::serve",
        addr = %settings.server.addr,
        content = %settings.content.directory.display(),
        "Listening"
    );

    serve_until_shutdown(listener, router, settings.server.graceful_shutdown).await
}

/// Serves until ctrl-c, then gives in-flight requests `grace` to finish.
async fn serve_until_shutdown(
    listener: tokio::net::TcpListener,
    router: axum::Router,
    grace: Duration,
) -> Result<(), AppError> {
    let shutdown = Arc::new(Notify::new());
    let trigger = Arc::clone(&shutdown);

    let server = async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                trigger.notify_one();
            })
            .await
    };
    let deadline = async move {
        shutdown.notified().await;
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = server => {
            result.map_err(|err| AppError::unexpected(format!("server error: {err}")))
        }
        () = deadline => {
            warn!(
                target = "a2ui::serve",
                grace_seconds = grace.as_secs(),
                "Graceful shutdown timed out; dropping open connections"
            );
            Ok(())
        }
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!(target = "a2ui::serve", "Shutdown signal received"),
        Err(err) => {
            error!(target = "a2ui::serve", error = %err, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

fn run_render(args: config::RenderArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.file)
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    let surface = parse_surface_document(&raw)?;

    let view = match args.focus.as_deref() {
        Some(focus) => SurfaceViewState::focused(focus.parse::<GalleryFocus>()?),
        None => SurfaceViewState::default(),
    };
    let placement = if args.duplicate_children {
        ChildPlacement::Duplicate
    } else {
        ChildPlacement::NestedOnly
    };

    let rendered = SurfaceRenderer::new(markdown_service())
        .with_placement(placement)
        .render(&surface.components, &view);
    info!(
        target = "a2ui::render",
        file = %args.file.display(),
        components = rendered.stats.components,
        placeholders = rendered.stats.placeholders,
        dropped_children = rendered.stats.dropped_children,
        "Rendered surface"
    );

    println!("{}", rendered.to_html());
    Ok(())
}

/// Accepts either a `{"surfaceUpdate": ...}` envelope or a bare surface update.
fn parse_surface_document(raw: &str) -> Result<SurfaceUpdate, AppError> {
    if let Ok(envelope) = serde_json::from_str::<SurfaceEnvelope>(raw) {
        return Ok(envelope.surface_update);
    }
    serde_json::from_str::<SurfaceUpdate>(raw)
        .map_err(|err| AppError::validation(format!("not a surface update: {err}")))
}

fn run_schema() -> Result<(), AppError> {
    let schema = serde_json::to_string_pretty(component_schema())
        .map_err(|err| AppError::unexpected(format!("failed to encode schema: {err}")))?;
    println!("{schema}");
    Ok(())
}
