use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use amw_chatbot::adapters::ai::{AnthropicConfig, AnthropicProvider, OpenAIConfig, OpenAIProvider};
use amw_chatbot::adapters::email::{ResendConfig, ResendMailTransport};
use amw_chatbot::adapters::http::{build_router, AppServices};
use amw_chatbot::application::LeadRouting;
use amw_chatbot::config::{AiConfig, AiProvider, AppConfig, EmailConfig};
use amw_chatbot::domain::persona::PersonaPolicy;
use amw_chatbot::ports::{AIProvider, MailTransport};
use amw_chatbot::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init(&config.server).context("failed to initialise logging")?;
    config.validate().context("invalid configuration")?;

    let ai_provider = build_ai_provider(&config.ai)?;
    let mail_transport = build_mail_transport(&config.email)?;
    let lead_routing = LeadRouting::new(config.email.recipient.as_str(), config.email.timezone()?);
    let persona = PersonaPolicy::current();

    let info = ai_provider.provider_info();
    tracing::info!(
        provider = %info.name,
        model = %info.model,
        max_output_tokens = ?info.max_output_tokens,
        persona_version = persona.version,
        environment = ?config.server.environment,
        recipient = %lead_routing.recipient,
        "AMW chatbot starting"
    );

    let app = build_router(
        AppServices {
            ai_provider,
            mail_transport,
            persona,
            lead_routing,
        },
        &config.server,
    );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated with error")
}

fn build_ai_provider(config: &AiConfig) -> anyhow::Result<Arc<dyn AIProvider>> {
    let api_key = config
        .active_api_key()
        .context("active AI provider has no API key")?;

    let provider: Arc<dyn AIProvider> = match config.provider {
        AiProvider::Anthropic => {
            let mut settings = AnthropicConfig::new(api_key)
                .with_timeout(config.timeout())
                .with_max_tokens(config.max_tokens);
            if let Some(model) = &config.model {
                settings = settings.with_model(model.as_str());
            }
            if let Some(url) = &config.anthropic_base_url {
                settings = settings.with_base_url(url.as_str());
            }
            Arc::new(AnthropicProvider::new(settings)?)
        }
        AiProvider::OpenAI => {
            let mut settings = OpenAIConfig::new(api_key).with_timeout(config.timeout());
            if let Some(model) = &config.model {
                settings = settings.with_model(model.as_str());
            }
            if let Some(url) = &config.openai_base_url {
                settings = settings.with_base_url(url.as_str());
            }
            Arc::new(OpenAIProvider::new(settings)?)
        }
    };

    Ok(provider)
}

fn build_mail_transport(config: &EmailConfig) -> anyhow::Result<Arc<dyn MailTransport>> {
    let settings = ResendConfig::new(config.resend_api_key.as_str(), config.from_header())
        .with_base_url(config.api_base_url.as_str())
        .with_timeout(config.timeout());

    Ok(Arc::new(ResendMailTransport::new(settings)?))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
