//! Prompt rendering for the analyst request.

use crate::domain::{Fund, HistoricalPoint};

/// Fixed system instruction sent with every request.
pub const SYSTEM_INSTRUCTION: &str =
    "You are a helpful, professional financial assistant. Use Markdown for formatting.";

/// Keep every `every`-th point, starting with the first.
pub fn sample_history(history: &[HistoricalPoint], every: usize) -> Vec<HistoricalPoint> {
    history.iter().step_by(every.max(1)).copied().collect()
}

/// Render the analyst prompt for `fund` over its recent history.
pub fn render_prompt(fund: &Fund, history: &[HistoricalPoint], sample_every: usize) -> String {
    let summary = sample_history(history, sample_every)
        .iter()
        .map(|p| format!("{}: {}", p.date.format("%Y-%m-%d"), p.value))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a senior financial analyst. Provide a concise, professional analysis for the \
         following fund based on its profile and recent {days}-day performance.\n\
         \n\
         **Fund Profile:**\n\
         - Name: {name} ({code})\n\
         - Sector: {sector}\n\
         - Market Cap: ${cap}M\n\
         - Risk Level: {risk}\n\
         - Description: {description}\n\
         - Current NAV: {price}\n\
         - Today's Change: {change}%\n\
         \n\
         **Performance Data (Date: NAV):**\n\
         {summary}\n\
         \n\
         **Instructions:**\n\
         1. Analyze the trend (Bullish, Bearish, or Neutral).\n\
         2. Identify any potential risks or opportunities based on the sector and price movement.\n\
         3. Provide a brief \"Analyst Verdict\" recommendation (Buy, Hold, or Sell) with a reason.\n\
         4. Format the output with clear headings and bullet points using Markdown. Keep it under 200 words.\n",
        days = history.len().saturating_sub(1).max(1),
        name = fund.name,
        code = fund.code,
        sector = fund.sector,
        cap = fund.market_cap,
        risk = fund.risk_level,
        description = fund.description,
        price = fund.current_price,
        change = fund.day_change_percent,
    )
}
