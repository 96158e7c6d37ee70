use anyhow::{bail, Context, Result};
use gapedit::logging::Logger;
use gapedit::options::default_log_path;
use gapedit::{ClipboardIndexing, EditorOptions, TextEditor, WordList};
use std::path::PathBuf;

const DEMO_DOCUMENT: &str = "HelloWorldHelloWo";

/// コマンドライン引数
#[derive(Debug, Default)]
struct CliArgs {
    config: Option<PathBuf>,
    overrides: EditorOptions,
    document: Option<String>,
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args(&args)?;

    // 優先順位: 設定ファイル < 環境変数 < コマンドライン
    let file_options = match &cli.config {
        Some(path) => EditorOptions::from_json_file(path)?,
        None => EditorOptions::default(),
    };
    let env_options = EditorOptions::from_env().context("invalid GAPEDIT_* environment")?;
    let options = file_options
        .merged_with(&env_options)
        .merged_with(&cli.overrides);

    init_logging(&options)?;

    println!("gapedit - gap buffer editing walkthrough");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    let document = cli.document.unwrap_or_else(|| DEMO_DOCUMENT.to_string());
    let mut editor = TextEditor::from_options(&document, &options);
    print_step("initial", &editor)?;

    if editor.len_chars() >= 10 {
        run_walkthrough(&mut editor)?;
    } else {
        println!("document shorter than 10 characters, skipping clipboard walkthrough");
    }

    report_misspellings(&editor, &options)?;
    Ok(())
}

/// コピー、先頭へのペースト、カット、ペーストを順に実行
fn run_walkthrough(editor: &mut TextEditor) -> Result<()> {
    editor.copy(5, 10).context("copy 5..10")?;
    editor.paste_before(0).context("paste before 0")?;
    print_step("copy 5..10, paste before 0", editor)?;

    editor.cut(0, 5).context("cut 0..5")?;
    print_step("cut 0..5", editor)?;

    editor.paste(4).context("paste after 4")?;
    print_step("paste after 4", editor)?;
    Ok(())
}

fn print_step(label: &str, editor: &TextEditor) -> Result<()> {
    println!("{}: {}", label, editor.snapshot().to_json()?);
    Ok(())
}

fn report_misspellings(editor: &TextEditor, options: &EditorOptions) -> Result<()> {
    let path = options.resolve_dictionary_path()?;
    match WordList::load(&path) {
        Ok(words) => {
            println!("misspellings: {}", editor.misspellings(&words));
        }
        Err(e) => {
            log::warn!("{}", e);
            println!("dictionary unavailable, skipping spell check");
        }
    }
    Ok(())
}

fn init_logging(options: &EditorOptions) -> Result<()> {
    let mut logger = Logger::new(options.resolve_log_level());
    if let Some(path) = options.resolve_log_path()? {
        logger = logger.with_file_output(path);
    }
    logger.init().context("failed to install logger")?;
    Ok(())
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut cli = CliArgs::default();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--capacity" => {
                let value = expect_value(arg, iter.next())?;
                let capacity: usize = value
                    .parse()
                    .with_context(|| format!("invalid --capacity value: {}", value))?;
                if capacity == 0 {
                    bail!("--capacity must be positive");
                }
                cli.overrides.initial_capacity = Some(capacity);
            }
            "--dictionary" => {
                let value = expect_value(arg, iter.next())?;
                cli.overrides.dictionary_path = Some(PathBuf::from(value));
            }
            "--config" => {
                cli.config = Some(PathBuf::from(expect_value(arg, iter.next())?));
            }
            "--log-level" => {
                let value = expect_value(arg, iter.next())?;
                let level: log::LevelFilter = value
                    .parse()
                    .with_context(|| format!("invalid --log-level value: {}", value))?;
                cli.overrides.log_level = Some(level);
            }
            "--debug-log" => {
                cli.overrides.debug_log_path = default_log_path();
            }
            other if other.starts_with("--debug-log=") => {
                let path = &other["--debug-log=".len()..];
                if path.is_empty() {
                    bail!("--debug-log= requires a path");
                }
                cli.overrides.debug_log_path = Some(PathBuf::from(path));
            }
            "--physical" => {
                cli.overrides.clipboard_indexing = Some(ClipboardIndexing::Physical);
            }
            other if other.starts_with("--") => bail!("unknown option: {}", other),
            document => {
                if cli.document.is_some() {
                    bail!("only one document argument is accepted");
                }
                cli.document = Some(document.to_string());
            }
        }
    }

    Ok(cli)
}

fn expect_value<'a>(option: &str, value: Option<&'a String>) -> Result<&'a str> {
    match value {
        Some(value) => Ok(value.as_str()),
        None => bail!("{} requires a value", option),
    }
}
