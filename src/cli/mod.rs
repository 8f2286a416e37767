// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All answering is delegated to Layer 2 (application).
//
// Three modes are supported:
//   1. one-shot     — answer --question and exit
//   2. --interactive — keep reading questions from stdin
//                      against the same passage
//   3. --list-models — print the model registry and exit
//
// Answers (text or --json) go to stdout. The interactive banner,
// the "> " prompt and session notices go to stderr, so
// `--interactive --json` output stays a clean stream of JSON
// documents.
//
// Session commands:
//   :history  list answered questions (JSON array with --json)
//   :clear    forget the history
//   :quit     end the session (so does end of input)
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use std::io::{self, BufRead, Write};

use crate::application::config::EngineConfig;
use crate::application::orchestrator::QaOrchestrator;
use crate::domain::candidate::QaResult;
use crate::domain::strategy::StrategyRequest;
use crate::infra::history::History;
use crate::ml::extractor::LexicalExtractor;
use crate::ml::registry::ModelRegistry;
use commands::{AskArgs, TuningArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "passage-qa",
    version = "0.1.0",
    about = "Answer questions about a passage, choosing direct, chunked or ensemble extraction by its length."
)]
pub struct Cli {
    #[command(flatten)]
    pub ask: AskArgs,

    #[command(flatten)]
    pub tuning: TuningArgs,

    /// Print the known models and exit (as JSON with --json)
    #[arg(long)]
    pub list_models: bool,
}

impl Cli {
    /// Dispatch to the requested mode.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        let registry = ModelRegistry::builtin();

        if self.list_models {
            print!("{}", commands::render_models(&registry, self.ask.json)?);
            return Ok(());
        }

        let config    = EngineConfig::try_from(&self.tuning)?;
        let context   = self.ask.load_context()?;
        let model     = self.ask.resolve_model(&registry, &config, &context)?;
        let extractor = LexicalExtractor::new(registry);

        let orchestrator = QaOrchestrator::new(&extractor, &config)?;
        let mut session  = Session::new(
            orchestrator,
            context,
            model,
            self.ask.strategy_request(),
            self.ask.json,
            io::stdout(),
        );

        if let Some(question) = &self.ask.question {
            session.ask(question)?;
        }

        if self.ask.interactive {
            let stdin = io::stdin();
            session.interact(stdin.lock(), &mut io::stderr())?;
        }
        Ok(())
    }
}

/// One passage, one model, any number of questions.
/// Answers are written to `out`.
pub struct Session<'a, W: Write> {
    orchestrator: QaOrchestrator<'a>,
    context:      String,
    model:        String,
    request:      StrategyRequest,
    json:         bool,
    history:      History,
    out:          W,
}

impl<'a, W: Write> Session<'a, W> {
    pub fn new(
        orchestrator: QaOrchestrator<'a>,
        context:      String,
        model:        String,
        request:      StrategyRequest,
        json:         bool,
        out:          W,
    ) -> Self {
        Self { orchestrator, context, model, request, json, history: History::new(), out }
    }

    /// Answer one question, print it, and remember it if answered.
    pub fn ask(&mut self, question: &str) -> Result<Option<QaResult>> {
        let result = self.orchestrator.process(
            question,
            &self.context,
            &self.model,
            self.request.clone(),
        );

        commands::write_outcome(&mut self.out, question, result.as_ref(), &self.context, self.json)?;
        self.out.flush()?;

        if let Some(r) = &result {
            self.history.record(question, r);
        }
        Ok(result)
    }

    /// Read questions line by line until `:quit` or end of input.
    /// The banner, prompts and notices go to `prompts`.
    pub fn interact<R: BufRead, P: Write>(&mut self, input: R, prompts: &mut P) -> Result<()> {
        writeln!(prompts, "Ask a question (:history to review, :clear to forget, :quit to exit)")?;
        prompt(prompts)?;

        for line in input.lines() {
            let line = line?;
            match line.trim() {
                ""         => {}
                ":quit"    => break,
                ":history" => {
                    let listing = commands::render_history(&self.history, self.json)?;
                    self.out.write_all(listing.as_bytes())?;
                    self.out.flush()?;
                }
                ":clear"   => {
                    self.history.clear();
                    writeln!(prompts, "History cleared.")?;
                }
                question   => {
                    self.ask(question)?;
                }
            }
            prompt(prompts)?;
        }

        tracing::info!("Session ended with {} questions in history", self.history.len());
        Ok(())
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

fn prompt<P: Write>(prompts: &mut P) -> Result<()> {
    write!(prompts, "> ")?;
    prompts.flush()?;
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::registry::DISTILBERT;
    use commands::DEFAULT_CONTEXT;
    use std::io::Cursor;

    fn session(extractor: &LexicalExtractor, json: bool) -> Session<'_, Vec<u8>> {
        let orchestrator = QaOrchestrator::new(extractor, &EngineConfig::default()).unwrap();
        Session::new(
            orchestrator,
            DEFAULT_CONTEXT.to_string(),
            DISTILBERT.to_string(),
            StrategyRequest::Auto,
            json,
            Vec::new(),
        )
    }

    #[test]
    fn test_parse_one_shot() {
        let cli = Cli::try_parse_from([
            "passage-qa", "--question", "What is AI?", "--strategy", "chunked", "--max-words", "120",
        ])
        .unwrap();
        assert_eq!(cli.ask.question.as_deref(), Some("What is AI?"));
        assert_eq!(cli.ask.strategy, "chunked");
        assert_eq!(cli.tuning.max_words, Some(120));
        assert!(!cli.list_models);
    }

    #[test]
    fn test_question_required_unless_listing() {
        assert!(Cli::try_parse_from(["passage-qa"]).is_err());
        assert!(Cli::try_parse_from(["passage-qa", "--list-models"]).is_ok());
        assert!(Cli::try_parse_from(["passage-qa", "--list-models", "--json"]).is_ok());
        assert!(Cli::try_parse_from(["passage-qa", "--interactive"]).is_ok());
    }

    #[test]
    fn test_session_answers_default_passage() {
        let extractor = LexicalExtractor::default();
        let mut s     = session(&extractor, false);

        let result = s.ask("What is AI?").unwrap().unwrap();
        assert_eq!(result.answer(), "intelligence demonstrated by machines");
        assert_eq!(s.history().len(), 1);

        let out = String::from_utf8(s.into_output()).unwrap();
        assert!(out.starts_with("Question: What is AI?\nAnswer: intelligence demonstrated by machines\n"));
    }

    #[test]
    fn test_interactive_loop_stops_at_quit() {
        let extractor   = LexicalExtractor::default();
        let mut s       = session(&extractor, false);
        let mut prompts = Vec::new();

        let input = Cursor::new("What is AI?\n:history\n\n:quit\nWhat is AI?\n");
        s.interact(input, &mut prompts).unwrap();
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn test_unanswered_questions_are_not_recorded() {
        let extractor = LexicalExtractor::default();
        let mut s     = session(&extractor, false);

        let input = Cursor::new("Zebra quantum xylophone?\n");
        s.interact(input, &mut Vec::new()).unwrap();
        assert!(s.history().is_empty());
    }

    #[test]
    fn test_clear_forgets_history() {
        let extractor   = LexicalExtractor::default();
        let mut s       = session(&extractor, false);
        let mut prompts = Vec::new();

        let input = Cursor::new("What is AI?\n:clear\n");
        s.interact(input, &mut prompts).unwrap();
        assert!(s.history().is_empty());
        assert!(String::from_utf8(prompts).unwrap().contains("History cleared."));
    }

    #[test]
    fn test_interactive_json_output_is_only_json() {
        let extractor   = LexicalExtractor::default();
        let mut s       = session(&extractor, true);
        let mut prompts = Vec::new();

        let input = Cursor::new("What is AI?\nZebra quantum xylophone?\n:history\n:quit\n");
        s.interact(input, &mut prompts).unwrap();

        let out  = s.into_output();
        let docs: Vec<serde_json::Value> = serde_json::Deserializer::from_slice(&out)
            .into_iter::<serde_json::Value>()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0]["answer"], "intelligence demonstrated by machines");
        assert!(docs[1].is_null());
        assert_eq!(docs[2].as_array().map(Vec::len), Some(1));

        let prompts = String::from_utf8(prompts).unwrap();
        assert!(prompts.starts_with("Ask a question"));
        assert!(prompts.contains("> "));
    }
}
