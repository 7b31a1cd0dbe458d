//! `adk-docqa` command-line front end.
//!
//! ```text
//! adk-docqa paper.pdf summary
//! adk-docqa paper.pdf quiz --count 3 --seed 7
//! adk-docqa paper.pdf ask "What dataset was used?"
//! adk-docqa --backend openai paper.pdf chat
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use adk_docqa::ollama::OllamaClient;
use adk_docqa::openai::OpenAIClient;
use adk_docqa::{
    DocQaConfig, DocumentAssistant, EmbeddingProvider, GenerativeService, Mode, QaResponse,
    Session,
};
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    Ollama,
    Openai,
}

#[derive(Debug, Parser)]
#[command(name = "adk-docqa", version, about = "Summarize, quiz, and question a document")]
struct Cli {
    /// Document to load (.pdf or .txt).
    file: PathBuf,

    /// Model backend.
    #[arg(long, value_enum, default_value_t = Backend::Ollama)]
    backend: Backend,

    /// Generation model name.
    #[arg(long)]
    model: Option<String>,

    /// Embedding model name.
    #[arg(long)]
    embedding_model: Option<String>,

    /// Output size of `--embedding-model`.
    #[arg(long, default_value_t = 384)]
    embedding_dimensions: usize,

    /// Server base URL (Ollama host or OpenAI-compatible `/v1` root).
    #[arg(long)]
    base_url: Option<String>,

    /// JSON file with `DocQaConfig` overrides.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the document summary.
    Summary,
    /// Answer generated questions and get scored.
    Quiz {
        /// Number of questions to generate.
        #[arg(long)]
        count: Option<usize>,
        /// Seed for window and hint selection.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Ask one question and print the justified answer.
    Ask { question: String },
    /// Interactive loop: `:summary`, `:quiz`, `:quit`; anything else is a question.
    Chat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,adk_docqa=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<DocQaConfig>(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => DocQaConfig::default(),
    };
    if let Command::Quiz { count: Some(count), .. } = &cli.command {
        config.question_count = *count;
    }

    let (generator, embedder) = build_services(&cli)?;
    let assistant = DocumentAssistant::builder()
        .config(config)
        .generator(generator)
        .embedder(embedder)
        .build()?;

    let mut session = Session::open(&cli.file)?;

    match &cli.command {
        Command::Summary => {
            println!("{}", session.summary(&assistant).await);
        }
        Command::Quiz { seed, .. } => {
            let mut rng = (*seed).map(fastrand::Rng::with_seed).unwrap_or_else(fastrand::Rng::new);
            let mut editor = DefaultEditor::new()?;
            run_quiz(&mut session, &assistant, &mut editor, &mut rng).await?;
        }
        Command::Ask { question } => {
            let response = session.ask(&assistant, question).await;
            print_response(&response);
        }
        Command::Chat => {
            run_chat(&mut session, &assistant).await?;
        }
    }

    Ok(())
}

fn build_services(
    cli: &Cli,
) -> anyhow::Result<(Arc<dyn GenerativeService>, Arc<dyn EmbeddingProvider>)> {
    match cli.backend {
        Backend::Ollama => {
            let mut client = match &cli.base_url {
                Some(url) => OllamaClient::new(url.as_str()),
                None => OllamaClient::from_env(),
            };
            if let Some(model) = &cli.model {
                client = client.with_model(model.as_str());
            }
            if let Some(model) = &cli.embedding_model {
                client = client.with_embedding_model(model.as_str(), cli.embedding_dimensions);
            }
            let client = Arc::new(client);
            let generator: Arc<dyn GenerativeService> = client.clone();
            let embedder: Arc<dyn EmbeddingProvider> = client;
            Ok((generator, embedder))
        }
        Backend::Openai => {
            let mut client = OpenAIClient::from_env()?;
            if let Some(url) = &cli.base_url {
                client = client.with_base_url(url.as_str());
            }
            if let Some(model) = &cli.model {
                client = client.with_chat_model(model.as_str());
            }
            if let Some(model) = &cli.embedding_model {
                client = client.with_embedding_model(model.as_str(), cli.embedding_dimensions);
            }
            let client = Arc::new(client);
            let generator: Arc<dyn GenerativeService> = client.clone();
            let embedder: Arc<dyn EmbeddingProvider> = client;
            Ok((generator, embedder))
        }
    }
}

/// Read one line; `None` on Ctrl-C / Ctrl-D.
fn read_line(editor: &mut DefaultEditor, prompt: &str) -> anyhow::Result<Option<String>> {
    match editor.readline(prompt) {
        Ok(line) => {
            if !line.trim().is_empty() {
                editor.add_history_entry(line.as_str())?;
            }
            Ok(Some(line))
        }
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn run_quiz(
    session: &mut Session,
    assistant: &DocumentAssistant,
    editor: &mut DefaultEditor,
    rng: &mut fastrand::Rng,
) -> anyhow::Result<()> {
    println!("Generating challenge questions...");
    let questions: Vec<String> =
        session.generate_questions(assistant, rng).await.iter().map(|q| q.text.clone()).collect();

    let mut answers = Vec::with_capacity(questions.len());
    for (i, question) in questions.iter().enumerate() {
        println!("\nQ{}: {question}", i + 1);
        match read_line(editor, &format!("Your answer to Q{}> ", i + 1))? {
            Some(answer) => answers.push(answer),
            None => return Ok(()),
        }
    }

    println!("\nEvaluating...");
    for (i, record) in session.submit_answers(assistant, &answers).await.iter().enumerate() {
        println!("\nQ{}: {}", i + 1, record.question);
        println!("- Your Answer: {}", record.user_answer);
        println!("- Reference Answer: {}", record.reference_answer);
        println!("- Score: {}", record.score);
    }
    Ok(())
}

async fn run_chat(session: &mut Session, assistant: &DocumentAssistant) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new()?;
    let mut rng = fastrand::Rng::new();
    println!("Loaded {}. Type a question, or :summary, :quiz, :quit.", session.document().name);

    loop {
        let prompt = match session.mode() {
            Mode::Initial => "docqa> ".to_string(),
            mode => format!("docqa [{mode}]> "),
        };
        let Some(line) = read_line(&mut editor, &prompt)? else {
            break;
        };
        match line.trim() {
            "" => continue,
            ":quit" | ":q" => break,
            ":summary" => println!("{}", session.summary(assistant).await),
            ":quiz" => run_quiz(session, assistant, &mut editor, &mut rng).await?,
            question => {
                let response = session.ask(assistant, question).await;
                print_response(&response);
            }
        }
    }
    Ok(())
}

fn print_response(response: &QaResponse) {
    println!("Answer:\n{}", response.answer);
    println!("\nJustification (Context):\n{}", response.justification());
}
