use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use storefront_api::{date, Order, OrderId, OrderStatus, Remote};
use storefront_store::OrderAction;

use super::CommandContext;

#[derive(Subcommand, Debug)]
pub enum OrdersCommand {
    /// Synchronize one page of orders and list it
    List {
        /// Only orders with this status slug
        #[arg(long)]
        status: Option<OrderStatus>,
        #[arg(long, default_value_t = Remote::DEFAULT_PAGE)]
        page: u32,
        #[arg(long, default_value_t = Remote::DEFAULT_PAGE_SIZE)]
        per_page: u32,
        /// List what is stored locally instead of asking the backend
        #[arg(long)]
        cached: bool,
    },

    /// Fetch one order and show its details
    Show { order_id: OrderId },

    /// Move an order to a new status
    SetStatus { order_id: OrderId, status: OrderStatus },

    /// Forget every stored order of the site
    Reset {
        /// Wipe local storage for every site, not just this one
        #[arg(long)]
        all_sites: bool,
    },
}

pub async fn run(ctx: &CommandContext, command: OrdersCommand) -> Result<()> {
    if let OrdersCommand::Reset { all_sites: true } = command {
        ctx.storage
            .reset()
            .await
            .context("Failed to wipe local storage")?;
        println!("{} local storage wiped for all sites", "✓".green());
        return Ok(());
    }

    let site_id = ctx.site()?;
    match command {
        OrdersCommand::List {
            status,
            page,
            per_page,
            cached,
        } => {
            let orders = if cached {
                let mut orders = ctx
                    .storage
                    .load_orders(site_id)
                    .await
                    .context("Failed to read stored orders")?;
                if let Some(status) = &status {
                    orders.retain(|order| &order.status == status);
                }
                orders
            } else {
                ctx.request(|on_completion| {
                    OrderAction::SynchronizeOrders {
                        site_id,
                        status,
                        page,
                        page_size: per_page,
                        on_completion,
                    }
                    .into()
                })
                .await?
            };

            if orders.is_empty() {
                println!("{}", "No orders".dimmed());
            }
            for order in &orders {
                println!("{}", summary_line(order));
            }
        }

        OrdersCommand::Show { order_id } => {
            let order = ctx
                .request(|on_completion| {
                    OrderAction::RetrieveOrder {
                        site_id,
                        order_id,
                        on_completion,
                    }
                    .into()
                })
                .await?;
            print_details(&order);
        }

        OrdersCommand::SetStatus { order_id, status } => {
            let order = ctx
                .request(|on_completion| {
                    OrderAction::UpdateOrder {
                        site_id,
                        order_id,
                        status,
                        on_completion,
                    }
                    .into()
                })
                .await?;
            println!(
                "{} order #{} is now {}",
                "✓".green(),
                order.number,
                paint_status(&order.status)
            );
        }

        OrdersCommand::Reset { .. } => {
            let removed = ctx
                .request(|on_completion| {
                    OrderAction::ResetStoredOrders {
                        site_id,
                        on_completion,
                    }
                    .into()
                })
                .await?;
            println!("{} removed {removed} stored orders", "✓".green());
        }
    }
    Ok(())
}

fn summary_line(order: &Order) -> String {
    format!(
        "#{:<8} {:<18} {:>10} {:<4} {:<24} {}",
        order.number,
        paint_status(&order.status),
        order.total,
        order.currency,
        order.customer_name().unwrap_or_else(|| "Guest".to_string()),
        date::format(&order.date_created).dimmed()
    )
}

fn print_details(order: &Order) {
    println!("{} #{}", "Order".bold(), order.number);
    println!("  status:   {}", paint_status(&order.status));
    println!("  created:  {}", date::format(&order.date_created));
    if let Some(customer) = order.customer_name() {
        println!("  customer: {customer}");
    }
    if !order.payment_method_title.is_empty() {
        println!("  payment:  {}", order.payment_method_title);
    }
    if !order.customer_note.is_empty() {
        println!("  note:     {}", order.customer_note.italic());
    }
    for item in &order.items {
        println!("  {} x {:<30} {:>10}", item.quantity, item.name, item.total);
    }
    println!(
        "  total:    {} {} (tax {}, shipping {})",
        order.total.bold(),
        order.currency,
        order.total_tax,
        order.shipping_total
    );
}

fn paint_status(status: &OrderStatus) -> colored::ColoredString {
    let slug = status.as_str();
    match status {
        OrderStatus::Completed => slug.green(),
        OrderStatus::Processing => slug.cyan(),
        OrderStatus::Pending | OrderStatus::OnHold => slug.yellow(),
        OrderStatus::Cancelled | OrderStatus::Refunded | OrderStatus::Failed => slug.red(),
        OrderStatus::Custom(_) => slug.normal(),
    }
}
