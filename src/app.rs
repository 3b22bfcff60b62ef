use chrono::Utc;
use std::fs::File;
use std::io::{self, ErrorKind, Write};
use std::path::PathBuf;
use tracing::debug;

use crate::cli::{Cli, Commands, ReportArgs};
use crate::config::Config;
use crate::consts::{DEFAULT_FLUSH_LINES, DEFAULT_MAX_LINE_LENGTH};
use crate::core::{FilterConfig, ReportOptions, TimeFormatter, run_report};
use crate::error::{AppError, ReportError};
use crate::logbook::{ExclusionFilters, append_line, open_log_for_append};
use crate::reader::{ForwardLineReader, LineReader, ReverseLineReader};
use crate::utils::{Timezone, parse_since};

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) config: &'a Config,
}

impl CommandContext<'_> {
    fn max_line_length(&self) -> usize {
        self.config
            .max_line_length
            .unwrap_or(DEFAULT_MAX_LINE_LENGTH)
    }
}

/// Dispatch the parsed command line
pub(crate) fn run(cli: Cli, config: &Config) -> Result<(), AppError> {
    let cli = cli.with_config(config);
    let ctx = CommandContext {
        cli: &cli,
        config,
    };

    match &cli.command {
        Commands::Log { session, args } => handle_log(session, args, &ctx),
        Commands::Report(args) => handle_report(args, &ctx),
        Commands::Filters => handle_filters(&ctx),
    }
}

fn handle_log(session: &str, args: &[String], ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let command = args.join(" ");
    let filters = ExclusionFilters::load(&ctx.cli.filter_file())?;

    let path = ctx.cli.log_file();
    let mut file = open_log_for_append(&path).map_err(|source| AppError::Open {
        path: path.clone(),
        source,
    })?;
    let written = append_line(&mut file, session, &command, &filters, Utc::now().timestamp())
        .map_err(|source| AppError::Append {
            path: path.clone(),
            source,
        })?;
    if !written {
        debug!(session, "command excluded by filters");
    }
    Ok(())
}

fn report_options(args: &ReportArgs, ctx: &CommandContext<'_>) -> Result<ReportOptions, ReportError> {
    let timezone = Timezone::parse(
        args.timezone
            .as_deref()
            .or(ctx.config.timezone.as_deref()),
    )?;
    let since = args
        .since
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|s| parse_since(s, timezone))
        .transpose()?;
    let filter = FilterConfig::new(args.session.as_deref(), args.grep.as_deref(), since)?;

    let home = ctx
        .config
        .home
        .clone()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("/"));

    Ok(ReportOptions {
        filter,
        time: TimeFormatter::new(Utc::now().timestamp(), timezone),
        pwd: args.pwd || ctx.config.pwd,
        reverse: args.reverse || ctx.config.reverse,
        home,
        workers: args
            .workers
            .or(ctx.config.workers)
            .unwrap_or_else(rayon::current_num_threads),
        flush_lines: ctx.config.flush_lines.unwrap_or(DEFAULT_FLUSH_LINES),
    })
}

fn handle_report(args: &ReportArgs, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    // Configuration errors surface before the log is touched
    let options = report_options(args, ctx)?;
    let max_line_length = ctx.max_line_length();

    let mut reader: Box<dyn LineReader> = if ctx.cli.reads_stdin() {
        Box::new(ForwardLineReader::new(io::stdin(), max_line_length))
    } else {
        let path = ctx.cli.log_file();
        let file = File::open(&path).map_err(|source| AppError::Open { path, source })?;
        // The reverse reader seeks, so it only serves the streaming path
        if options.reverse && !options.pwd {
            Box::new(ReverseLineReader::new(file, max_line_length).map_err(ReportError::from)?)
        } else {
            Box::new(ForwardLineReader::new(file, max_line_length))
        }
    };

    let stdout = io::stdout().lock();
    match run_report(reader.as_mut(), &options, stdout) {
        Ok(summary) => {
            debug!(lines = summary.lines, printed = summary.printed, "report done");
            Ok(())
        }
        // The reader of our output went away (e.g. `| head`), nothing left to do
        Err(ReportError::Write(e)) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn handle_filters(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let path = ctx.cli.filter_file();
    ExclusionFilters::save_defaults(&path)?;
    let filters = ExclusionFilters::load(&path)?;

    let mut stdout = io::stdout().lock();
    for pattern in filters.patterns() {
        if let Err(source) = writeln!(stdout, "{pattern}") {
            if source.kind() == ErrorKind::BrokenPipe {
                break;
            }
            return Err(ReportError::Write(source).into());
        }
    }
    Ok(())
}
