use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use storefront_api::{date, OrderId, OrderNote};
use storefront_store::OrderNoteAction;

use super::CommandContext;

#[derive(Subcommand, Debug)]
pub enum NotesCommand {
    /// Fetch the notes of an order
    List { order_id: OrderId },

    /// Add a note to an order
    Add {
        order_id: OrderId,
        note: String,
        /// Email the note to the customer
        #[arg(long)]
        customer: bool,
    },
}

pub async fn run(ctx: &CommandContext, command: NotesCommand) -> Result<()> {
    let site_id = ctx.site()?;
    match command {
        NotesCommand::List { order_id } => {
            let notes = ctx
                .request(|on_completion| {
                    OrderNoteAction::RetrieveOrderNotes {
                        site_id,
                        order_id,
                        on_completion,
                    }
                    .into()
                })
                .await?;
            if notes.is_empty() {
                println!("{}", "No notes".dimmed());
            }
            for note in &notes {
                print_note(note);
            }
        }

        NotesCommand::Add {
            order_id,
            note,
            customer,
        } => {
            let note = ctx
                .request(|on_completion| {
                    OrderNoteAction::AddOrderNote {
                        site_id,
                        order_id,
                        is_customer_note: customer,
                        note,
                        on_completion,
                    }
                    .into()
                })
                .await?;
            println!("{} note #{} added", "✓".green(), note.note_id);
        }
    }
    Ok(())
}

fn print_note(note: &OrderNote) {
    let visibility = if note.is_customer_note {
        "to customer".magenta()
    } else {
        "private".dimmed()
    };
    println!(
        "{} {} ({visibility})",
        date::format(&note.date_created).dimmed(),
        note.author.bold()
    );
    println!("  {}", note.note);
}
