use std::{error::Error as _, future::IntoFuture, process, sync::Arc, time::Duration};

use anaconda::{
    application::{
        catalog::DocumentCatalog,
        error::AppError,
        render::{MarkdownRenderer, RenderPipelineConfig, RenderService},
        templates::{MiniJinjaExpander, TemplateContext},
    },
    config,
    infra::{
        error::InfraError,
        http::{self, HttpState},
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
        error!(
            error = %error,
            cause = error.source().map(tracing::field::display),
            "application error"
        );
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(
            error = %error,
            cause = error.source().map(tracing::field::display),
            "application error"
        );
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    let renderer = build_renderer(&settings);

    match command {
        config::Command::Serve(_) => run_serve(settings, renderer).await,
        config::Command::Render(args) => run_render(renderer, args),
    }
}

fn build_renderer(settings: &config::Settings) -> Arc<MarkdownRenderer> {
    let templates = MiniJinjaExpander::from_directory(settings.content.directory.clone());
    Arc::new(MarkdownRenderer::new(
        Arc::new(templates),
        RenderPipelineConfig::from(&settings.render),
    ))
}

async fn run_serve(
    settings: config::Settings,
    renderer: Arc<MarkdownRenderer>,
) -> Result<(), AppError> {
    if !settings.content.directory.is_dir() {
        return Err(InfraError::configuration(format!(
            "content directory `{}` does not exist",
            settings.content.directory.display()
        ))
        .into());
    }

    let syntax_css = renderer.syntax_stylesheet()?;
    let catalog = DocumentCatalog::python_docs();
    let state = HttpState {
        renderer,
        catalog: Arc::new(catalog),
        syntax_css: Arc::from(syntax_css),
    };

    serve_http(&settings, state).await
}

async fn serve_http(settings: &config::Settings, state: HttpState) -> Result<(), AppError> {
    let router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    info!(
        target = "anaconda::serve",
        addr = %settings.server.addr,
        content = %settings.content.directory.display(),
        "listening"
    );

    let shutdown = Arc::new(Notify::new());
    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(wait_for_ctrl_c(Arc::clone(&shutdown)));
    let grace = settings.server.graceful_shutdown;

    tokio::select! {
        result = server.into_future() => {
            result.map_err(|err| AppError::from(InfraError::from(err)))?;
        }
        _ = shutdown_deadline(shutdown, grace) => {
            warn!(
                target = "anaconda::serve",
                grace_secs = grace.as_secs(),
                "graceful shutdown timed out; dropping open connections"
            );
        }
    }

    info!(target = "anaconda::serve", "server stopped");
    Ok(())
}

async fn wait_for_ctrl_c(shutdown: Arc<Notify>) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(target = "anaconda::serve", error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!(target = "anaconda::serve", "shutdown requested");
    shutdown.notify_waiters();
}

async fn shutdown_deadline(shutdown: Arc<Notify>, grace: Duration) {
    shutdown.notified().await;
    tokio::time::sleep(grace).await;
}

fn run_render(renderer: Arc<MarkdownRenderer>, args: config::RenderArgs) -> Result<(), AppError> {
    let mut context = TemplateContext::for_document(&args.document);
    for (key, value) in args.vars {
        context.insert(key, value);
    }

    if args.navigation {
        let page = renderer.render_page(&args.document, &context)?;
        let navigation = serde_json::to_string_pretty(&page.navigation)
            .map_err(|err| AppError::unexpected(format!("failed to encode navigation: {err}")))?;
        println!("{}", page.content);
        println!("{navigation}");
    } else {
        println!("{}", renderer.render_markdown(&args.document, &context)?);
    }

    Ok(())
}
