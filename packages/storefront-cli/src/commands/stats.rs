use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::Args;
use colored::Colorize;
use storefront_api::{OrderStats, StatGranularity};
use storefront_store::OrderStatsAction;

use super::CommandContext;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Bucket size: day, week, month or year
    #[arg(long, default_value = "day")]
    pub granularity: StatGranularity,
    /// Latest date to include (YYYY-MM-DD); today when omitted
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Number of buckets
    #[arg(long, default_value_t = 7)]
    pub quantity: u32,
}

pub async fn run(ctx: &CommandContext, args: StatsArgs) -> Result<()> {
    let site_id = ctx.site()?;
    let date = args.date.unwrap_or_else(|| Utc::now().date_naive());
    let latest_date_to_include = date.and_time(chrono::NaiveTime::MIN);

    let stats = ctx
        .request(|on_completion| {
            OrderStatsAction::RetrieveOrderStats {
                site_id,
                granularity: args.granularity,
                latest_date_to_include,
                quantity: args.quantity,
                on_completion,
            }
            .into()
        })
        .await?;
    print_stats(&stats);
    Ok(())
}

fn print_stats(stats: &OrderStats) {
    println!(
        "{} by {} up to {}",
        "Order stats".bold(),
        stats.granularity,
        stats.date
    );
    println!(
        "{:<12} {:>7} {:>9} {:>12} {:>12}",
        "period", "orders", "products", "gross", "net"
    );
    for item in &stats.items {
        println!(
            "{:<12} {:>7} {:>9} {:>12.2} {:>12.2}",
            item.period, item.orders, item.products, item.gross_sales, item.net_sales
        );
    }
    println!(
        "{:<12} {:>7} {:>9} {:>12.2} {:>12.2}",
        "total",
        stats.total_orders,
        stats.total_products,
        stats.total_gross_sales,
        stats.total_net_sales
    );
}
