//! Line-driven terminal host for the four screens.

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::{info, warn};

use crate::router::{Screen, ViewRouter};
use crate::upload::UploadCandidate;

const BACK: &str = ":b";
const QUIT: &str = ":q";
/// Separates several paths on one line; spaces belong to the path.
const PATH_SEPARATOR: char = ';';

pub struct Console<R, W> {
    router: ViewRouter,
    input: Lines<R>,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(router: ViewRouter, input: R, output: W) -> Self {
        Self {
            router,
            input: input.lines(),
            output,
        }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (ViewRouter, W) {
        (self.router, self.output)
    }

    async fn say(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }

    fn prompt(&self) -> String {
        match self.router.current() {
            Screen::Chooser => {
                "\nHow would you like to find jobs?\n  1) Upload resume\n  2) Enter text search\n  :q) Quit".to_string()
            }
            Screen::ResumeEntry => format!(
                "\nUpload your resume: enter the path of a PDF or TXT file ({BACK} to go back)"
            ),
            Screen::TextEntry => format!(
                "\nSearch jobs by text, e.g. remote React developer ({BACK} to go back)"
            ),
            Screen::Results => format!(
                "\n{}\n\n  n) New search\n  {QUIT}) Quit",
                self.router.results_view()
            ),
        }
    }

    /// Runs until the user quits or input ends.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let prompt = self.prompt();
            self.say(&prompt).await?;

            let Some(line) = self.input.next_line().await? else {
                self.finish();
                return Ok(());
            };
            let line = line.trim().to_string();
            if line == QUIT {
                self.finish();
                return Ok(());
            }

            match self.router.current() {
                Screen::Chooser => match line.as_str() {
                    "1" => self.router.open_resume_entry()?,
                    "2" => self.router.open_text_entry()?,
                    other => self.say(&format!("Unknown choice '{other}'")).await?,
                },
                Screen::ResumeEntry if line == BACK => self.router.back()?,
                Screen::ResumeEntry => self.handle_resume(&line).await?,
                Screen::TextEntry if line == BACK => self.router.back()?,
                Screen::TextEntry => {
                    self.say("Searching...").await?;
                    self.router.submit_text(&line).await?;
                    self.show_entry_error().await?;
                }
                Screen::Results => match line.as_str() {
                    "n" => self.router.new_search()?,
                    other => self.say(&format!("Unknown choice '{other}'")).await?,
                },
            }
        }
    }

    fn finish(&self) {
        info!(
            "Session ended after {} screen transitions",
            self.router.transitions().len()
        );
    }

    async fn handle_resume(&mut self, line: &str) -> Result<()> {
        let mut candidates = Vec::new();
        for path in line
            .split(PATH_SEPARATOR)
            .map(str::trim)
            .filter(|p| !p.is_empty())
        {
            match UploadCandidate::from_path(path).await {
                Ok(candidate) => candidates.push(candidate),
                Err(e) => {
                    warn!("{e:#}");
                    return self.say(&format!("{e:#}")).await;
                }
            }
        }

        self.say("Uploading...").await?;
        self.router.submit_resume(candidates).await?;
        self.show_entry_error().await
    }

    async fn show_entry_error(&mut self) -> Result<()> {
        if let Some(error) = self.router.entry_error() {
            self.say(&format!("Error: {error}")).await?;
        }
        Ok(())
    }
}
