use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect4_ai::{
    board::Cell,
    game::GameState,
    progress::{AiProgress, ColumnScore},
    solver::WIN_SCORE,
    win::Coord,
};

const CELL_WIDTH: usize = 4;

/// Draws the board top row first, highlighting the winning line
pub fn draw_board(game: &GameState) -> Result<()> {
    let mut stdout = stdout();
    let board = game.board();

    let header: String = (1..=board.cols())
        .map(|column| format!("{:^width$}", column, width = CELL_WIDTH))
        .collect();
    stdout.queue(PrintStyledContent(style(header + "\n")))?;

    for row in (0..board.rows()).rev() {
        for column in 0..board.cols() {
            let highlighted = game
                .winning_run()
                .map_or(false, |run| run.contains(&Coord::new(row, column)));

            stdout.queue(PrintStyledContent(
                style(format!("{:^width$}", "O", width = CELL_WIDTH))
                    .attribute(Attribute::Bold)
                    .on(if highlighted {
                        Color::DarkGreen
                    } else {
                        Color::DarkBlue
                    })
                    .with(match board.get(row, column) {
                        Cell::PlayerOne => Color::Red,
                        Cell::PlayerTwo => Color::Yellow,
                        Cell::Empty => Color::Black,
                    }),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}

/// Prints the top-level score of every column under the board
pub fn draw_scores(progress: &AiProgress) -> Result<()> {
    let mut stdout = stdout();

    let line: String = progress
        .scores
        .iter()
        .map(|score| {
            let text = match score {
                ColumnScore::Scored(score) if *score >= WIN_SCORE => "WIN".to_string(),
                ColumnScore::Scored(score) if *score <= -WIN_SCORE => "LOSS".to_string(),
                ColumnScore::Scored(score) => score.to_string(),
                ColumnScore::NotApplicable => "-".to_string(),
                ColumnScore::Pending => "?".to_string(),
            };
            format!("{:^width$}", text, width = CELL_WIDTH)
        })
        .collect();

    stdout.queue(PrintStyledContent(style(line + "\n").with(Color::Cyan)))?;
    stdout.flush()?;
    Ok(())
}
