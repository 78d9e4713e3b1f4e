// Terminal presenter - Renders the analysis screen as text or JSON
use crate::application::insight_service::InsightPresenter;
use crate::domain::analysis::{FarmAnalysis, INSIGHTS_HEADING, SCREEN_TITLE, TRENDS_HEADING};
use crate::infrastructure::config::OutputFormat;
use std::fmt::Write as _;
use std::io::Write;

pub struct TerminalPresenter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> InsightPresenter for TerminalPresenter<W> {
    fn present(&mut self, analysis: &FarmAnalysis) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Text => self.out.write_all(render_text(analysis).as_bytes())?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, analysis)?;
                self.out.write_all(b"\n")?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

pub fn render_text(analysis: &FarmAnalysis) -> String {
    let mut screen = String::new();
    let _ = writeln!(screen, "{}\n", SCREEN_TITLE);
    let _ = writeln!(screen, "{}", TRENDS_HEADING);

    let FarmAnalysis::Ready {
        trend,
        cards,
        weekly_report,
    } = analysis
    else {
        let _ = writeln!(screen, "Loading...");
        return screen;
    };

    match trend.value_range() {
        Some((min, max)) => {
            let _ = writeln!(screen, "{} (range {} to {})", trend.label, min, max);
        }
        None => {
            let _ = writeln!(screen, "{}", trend.label);
        }
    }
    for point in &trend.points {
        let _ = writeln!(screen, "  #{}  {}", point.index, point.value);
    }

    let _ = writeln!(screen, "\n{}", INSIGHTS_HEADING);
    for card in cards {
        let _ = writeln!(screen, "  {}\n  {}\n  {}\n", card.name, card.value, card.advice);
    }

    let _ = writeln!(screen, "{}", weekly_report);
    screen
}
