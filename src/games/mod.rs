pub mod streak;

use crate::error::Error;
use crate::scores::ScoreTable;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Category
{
    pub name: &'static str,
    pub file: &'static str,
    pub label: &'static str,
}

pub fn registry() -> Vec<Category>
{
    vec![
        Category {
            name: "Streak",
            file: "words.txt",
            label: "Standard Streak",
        },
        Category {
            name: "Capitals",
            file: "capitals.txt",
            label: "Capital Cities",
        },
        Category {
            name: "Foods",
            file: "foods.txt",
            label: "Foods",
        },
        Category {
            name: "Animals",
            file: "animals.txt",
            label: "Animals",
        },
        Category {
            name: "Lorem",
            file: "lorem.txt",
            label: "Lorem Ipsum",
        },
    ]
}

pub fn find_category(name: &str) -> Result<Category, Error>
{
    registry()
        .into_iter()
        .find(|category| category.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::UnknownCategory(name.to_string()))
}

pub fn clear_screen(out: &mut impl Write) -> io::Result<()>
{
    queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
    out.flush()
}

pub fn write_high_scores(out: &mut impl Write, table: &ScoreTable) -> io::Result<()>
{
    writeln!(out, "{}", "--- HIGH SCORES ---".cyan().bold())?;
    if table.is_empty() {
        writeln!(out, "No scores recorded yet.")?;
    } else {
        for (category, score) in table {
            writeln!(out, "{category}: {}", score.to_string().yellow())?;
        }
    }
    writeln!(out, "{}", "-".repeat(20))?;
    writeln!(out)
}
