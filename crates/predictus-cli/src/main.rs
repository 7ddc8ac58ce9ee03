mod display;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use predictus_client::{ClientConfig, LookupClient};
use predictus_core::{Attachment, ImportRequest, mask_identifier, validate_identifier};
use predictus_ui::{Controller, UiEvent};

#[derive(Parser)]
#[command(name = "predictus", version, about = "Import legal-process records by CPF/CNPJ and review findings")]
struct Cli {
    /// Base URL of the Predictus server.
    #[arg(long, env = "PREDICTUS_URL", default_value = "http://localhost:8000", global = true)]
    base_url: String,

    /// Access token (JWT) for the authenticated session.
    #[arg(long, env = "PREDICTUS_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Log in with this e-mail (or bare user name) before the command.
    #[arg(long, env = "PREDICTUS_EMAIL", global = true, requires = "password")]
    email: Option<String>,

    /// Password for `--email`.
    #[arg(long, env = "PREDICTUS_PASSWORD", hide_env_values = true, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import a spreadsheet and show the findings for an identifier.
    Lookup {
        /// CPF (11 digits) or CNPJ (14 digits), punctuation optional.
        #[arg(long = "cpf-cnpj")]
        cpf_cnpj: String,

        /// Name of the person or entity.
        #[arg(long, default_value = "")]
        nome: String,

        /// Spreadsheet with the legal-process records.
        #[arg(long)]
        arquivo: Option<PathBuf>,

        /// Show the detail card for this findings row (zero-based).
        #[arg(long)]
        detail: Option<usize>,
    },
    /// Log in and print the session token for PREDICTUS_TOKEN.
    Login,
    /// Print an identifier in canonical CPF/CNPJ form.
    Mask { identifier: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("predictus v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let credentials = cli.email.zip(cli.password);
    match cli.command {
        Command::Mask { identifier } => {
            println!("{}", mask_identifier(&identifier));
            Ok(())
        }
        Command::Login => {
            if credentials.is_none() {
                anyhow::bail!("login needs --email and --password");
            }
            let client = connect(cli.base_url, cli.token, credentials).await?;
            if let Some(token) = client.access_token() {
                println!("{token}");
            }
            Ok(())
        }
        Command::Lookup {
            cpf_cnpj,
            nome,
            arquivo,
            detail,
        } => {
            let request = build_request(&cpf_cnpj, &nome, arquivo.as_deref()).await?;
            let client = connect(cli.base_url, cli.token, credentials).await?;
            run_lookup(client, request, detail).await
        }
    }
}

/// Client for the server, logged in first when credentials were given.
async fn connect(
    base_url: String,
    token: Option<String>,
    credentials: Option<(String, String)>,
) -> anyhow::Result<LookupClient> {
    let mut config = ClientConfig::new(base_url);
    if let Some(token) = token {
        config = config.with_access_token(token);
    }
    let mut client = LookupClient::new(config);
    if let Some((email, password)) = credentials {
        if let Err(e) = client.login(&email, &password).await {
            let reason = e.server_message().map(str::to_string).unwrap_or_else(|| e.to_string());
            anyhow::bail!("login failed: {reason}");
        }
    }
    Ok(client)
}

async fn build_request(
    cpf_cnpj: &str,
    nome: &str,
    arquivo: Option<&std::path::Path>,
) -> anyhow::Result<ImportRequest> {
    // Same normalisation the page applies when the field loses focus.
    let identifier = mask_identifier(cpf_cnpj);
    match validate_identifier(&identifier) {
        Ok(kind) => tracing::info!(kind = kind.label(), %identifier, "identifier"),
        Err(e) => tracing::warn!(error = %e, %identifier, "submitting unrecognised identifier"),
    }

    let mut request = ImportRequest::new(identifier).with_field("nome", nome);
    if let Some(path) = arquivo {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "arquivo.xlsx".to_string());
        request = request.with_attachment(Attachment::spreadsheet(file_name, bytes));
    }
    Ok(request)
}

async fn run_lookup(
    client: LookupClient,
    request: ImportRequest,
    detail: Option<usize>,
) -> anyhow::Result<()> {
    let mut controller = Controller::new(client);
    controller.dispatch(UiEvent::Submit(request)).await;

    let view = controller.view();
    if view.error.visible {
        anyhow::bail!("{}", view.error.message);
    }
    display::print_results(view);

    if let Some(row) = detail {
        controller
            .dispatch(UiEvent::FindingsClick { row: Some(row) })
            .await;
        let view = controller.view();
        if view.detail.is_visible() {
            display::print_detail_card(row, &view.detail);
        } else {
            eprintln!("no finding at row {row}");
        }
    }
    Ok(())
}
