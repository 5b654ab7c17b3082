//! Printing histories and recommendations to a terminal.

use std::fmt::Display;

use comfy_table::{Cell, Color, Row, Table};
use owo_colors::{OwoColorize, Stream};

use crate::{
    feedback::Grade,
    strategy::{GuessFeedback, SolveResponse},
};

/// Shows a guess as colored tiles, the way the game does.
///
/// Colors are only emitted when stdout supports them, so the pattern digits
/// follow the tiles.
#[derive(Clone, Copy, Debug)]
pub struct Tiles<'a>(pub &'a GuessFeedback);

impl Display for Tiles<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letters = self.0.guess.to_string();
        for (letter, grade) in letters.chars().zip(self.0.feedback.grades()) {
            let tile = format!(" {} ", letter);
            match grade {
                Grade::Correct => write!(
                    f,
                    "{}",
                    tile.if_supports_color(Stream::Stdout, |t| t.black().on_green().to_string())
                )?,
                Grade::Present => write!(
                    f,
                    "{}",
                    tile.if_supports_color(Stream::Stdout, |t| t.black().on_yellow().to_string())
                )?,
                Grade::Absent => write!(
                    f,
                    "{}",
                    tile.if_supports_color(Stream::Stdout, |t| t.on_bright_black().to_string())
                )?,
            }
        }
        write!(f, "  {}", self.0.feedback)
    }
}

/// Lays out the suggestions of a response, best first.
pub fn response_table(response: &SolveResponse) -> Table {
    let mut table = Table::new();
    if table.is_tty() {
        table.load_preset(comfy_table::presets::UTF8_FULL);
    } else {
        table.set_table_width(80);
    }
    table.set_header(vec!["#", "Suggestion"]);

    for (i, word) in response.suggestions.iter().enumerate() {
        let mut cell = Cell::new(word);
        if i == 0 {
            cell = cell.fg(Color::Green);
        }
        table.add_row(Row::from(vec![Cell::new(i + 1), cell]));
    }
    if response.is_exhausted() {
        table.add_row(Row::from(vec![
            Cell::new("-"),
            Cell::new("no word fits").bg(Color::Red).fg(Color::Black),
        ]));
    }

    table
}

/// Prints the history, the recommendation and the reasoning trace.
pub fn print_response(history: &[GuessFeedback], response: &SolveResponse) {
    for entry in history {
        println!("{}", Tiles(entry));
    }
    if !history.is_empty() {
        println!();
    }

    println!("{}", response_table(response));
    println!(
        "{} ({} remaining, {:.1}% confidence)",
        response
            .reasoning()
            .if_supports_color(Stream::Stdout, |text| text.bold()),
        response.remaining_candidates,
        response.confidence() * 100.
    );

    for thought in &response.thoughts {
        match thought.score {
            Some(score) => println!("  - {} [{}]", thought.message, score),
            None => println!("  - {}", thought.message),
        }
    }
}
