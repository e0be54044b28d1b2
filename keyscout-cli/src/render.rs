use anyhow::Result;
use colored::Colorize;
use keyscout::{highlight_segments, KeywordMatcher, Match, SearchOutput, Segment};
use std::io::{self, BufRead, Write};
use std::path::Path;

pub struct RenderOptions<'a> {
    pub root: &'a Path,
    pub keyword: &'a str,
    pub case_sensitive: bool,
    /// Ask before printing more results than this; `None` never asks
    pub confirm_threshold: Option<usize>,
}

/// Prints the results, asking first when there are more than the threshold
pub fn print_search_results(output: &SearchOutput, options: &RenderOptions) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    print_search_results_to(output, options, &mut stdin.lock(), &mut stdout.lock())
}

fn print_search_results_to(
    output: &SearchOutput,
    options: &RenderOptions,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let count = output.total_matches();
    writeln!(out)?;

    if let Some(threshold) = options.confirm_threshold {
        if count > threshold && !confirm(count, input, out)? {
            writeln!(out, "{} instances found.", count)?;
            writeln!(out, "Completed in {:.2} seconds", output.elapsed_seconds())?;
            return Ok(());
        }
    }

    let matcher = KeywordMatcher::new(options.keyword, options.case_sensitive)?;
    for m in &output.matches {
        write_match(m, options.root, &matcher, out)?;
    }

    writeln!(
        out,
        "Found {} instances in {:.2} seconds",
        count,
        output.elapsed_seconds()
    )?;
    Ok(())
}

/// Returns false only for an explicit answer other than "y"; end of input prints everything
fn confirm(count: usize, input: &mut impl BufRead, out: &mut impl Write) -> Result<bool> {
    write!(
        out,
        "Found {} instances. Do you want to print all results? (y/n): ",
        count
    )?;
    out.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Ok(true);
    }
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

fn write_match(
    m: &Match,
    root: &Path,
    matcher: &KeywordMatcher,
    out: &mut impl Write,
) -> Result<()> {
    let display_path = m.path.strip_prefix(root).unwrap_or(&m.path);
    write!(out, "{}, line {}: ", display_path.display(), m.line_number)?;

    for segment in highlight_segments(&m.snippet, matcher) {
        match segment {
            Segment::Plain(text) => write!(out, "{}", text)?,
            Segment::Keyword(text) => write!(out, "{}", text.yellow().bold())?,
        }
    }
    writeln!(out)?;
    Ok(())
}

/// Prints the whole output as pretty JSON
pub fn print_json(output: &SearchOutput) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}
