//! Текстовый и JSON-вывод отчётов.

use crate::dashboard::{AnalysisReport, OverviewReport};
use hotelrevlib::{
    aggregate::{Kpis, Series},
    error::Result,
    formats::csv::write_records,
    predict::Forecast,
};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::Serialize;
use std::io::Write;

const BAR_WIDTH: usize = 40;

pub fn json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

pub fn overview<W: Write>(out: &mut W, r: &OverviewReport<'_>) -> Result<()> {
    writeln!(out, "== Executive Overview ({} rows)", r.rows)?;
    writeln!(out)?;
    writeln!(out, "-- Data Preview")?;
    write_records(&mut *out, r.preview.iter())?;
    writeln!(out)?;
    kpis(out, &r.kpis, 2)?;
    writeln!(out)?;
    writeln!(out, "-- Revenue by Room Type")?;
    bars(out, &r.revenue_by_room_type)?;
    writeln!(out)?;
    writeln!(out, "-- Monthly Revenue Trend")?;
    bars(out, &r.revenue_by_month)?;
    Ok(())
}

pub fn analysis<W: Write>(out: &mut W, r: &AnalysisReport<'_>) -> Result<()> {
    let room = r
        .filter
        .room_type
        .map_or_else(|| "All".to_string(), |rt| rt.to_string());
    let available: Vec<String> = r.room_types.iter().map(|rt| rt.to_string()).collect();
    writeln!(out, "== Revenue Analytics")?;
    writeln!(
        out,
        "Room Category: {room} (available: All, {})   Stay Type: {}",
        available.join(", "),
        r.filter.stay_type
    )?;
    writeln!(out)?;
    kpis(out, &r.kpis, 0)?;
    writeln!(out)?;
    writeln!(out, "-- Revenue Contribution by Room Category")?;
    bars(out, &r.revenue_by_room_type)?;
    writeln!(out)?;
    writeln!(out, "-- Monthly Revenue Trend")?;
    bars(out, &r.revenue_by_month)?;
    if let Some(records) = &r.records {
        writeln!(out)?;
        writeln!(out, "-- Filtered Booking Records ({})", records.len())?;
        write_records(&mut *out, records.iter().copied())?;
    }
    Ok(())
}

pub fn forecast<W: Write>(out: &mut W, f: &Forecast) -> Result<()> {
    let p = &f.prediction;
    writeln!(out, "== Revenue Forecasting")?;
    writeln!(
        out,
        "Check-in: {}   Weekend Stay: {}",
        f.input.checkin(),
        if f.input.is_weekend() { "Yes" } else { "No" }
    )?;
    writeln!(out)?;
    writeln!(out, "Predicted Revenue:  ₹ {}", money_f64(p.point_estimate))?;
    writeln!(
        out,
        "Confidence Range:   ₹ {} – ₹ {}",
        money_f64(p.lower_bound),
        money_f64(p.upper_bound)
    )?;
    writeln!(
        out,
        "Conservative ₹ {}  |  Expected ₹ {}  |  Optimistic ₹ {}",
        money_f64(p.lower_bound),
        money_f64(p.point_estimate),
        money_f64(p.upper_bound)
    )?;
    writeln!(out)?;
    writeln!(out, "-- Base Revenue Estimate (no demand or seasonal adjustments)")?;
    writeln!(out, "Room Revenue     ₹ {}", money(f.base.room_revenue, 0))?;
    writeln!(out, "Service Revenue  ₹ {}", money(f.base.service_revenue, 0))?;
    writeln!(out, "Base Estimate    ₹ {}", money(f.base.total, 0))?;
    writeln!(out)?;
    writeln!(out, "-- Revenue Impact: Weekday vs Weekend")?;
    let s = &f.scenarios;
    let max = s.weekday.max(s.weekend);
    writeln!(out, "{:<14}{} ₹ {}", "Weekday Stay", bar(s.weekday, max), money_f64(s.weekday))?;
    writeln!(out, "{:<14}{} ₹ {}", "Weekend Stay", bar(s.weekend, max), money_f64(s.weekend))?;
    Ok(())
}

/// `avg_dp` — знаков после запятой у среднего чека.
fn kpis<W: Write>(out: &mut W, k: &Kpis, avg_dp: u32) -> Result<()> {
    let avg = k
        .average_revenue
        .map_or_else(|| "no data".to_string(), |a| money(a, avg_dp));
    writeln!(out, "Total Revenue:          {}", money(k.total_revenue, 0))?;
    writeln!(out, "Avg Revenue / Booking:  {avg}")?;
    writeln!(out, "Total Bookings:         {}", k.bookings)?;
    Ok(())
}

fn bars<W: Write>(out: &mut W, series: &Series) -> Result<()> {
    if series.is_empty() {
        writeln!(out, "(no data)")?;
        return Ok(());
    }
    let values: Vec<f64> = series
        .iter()
        .map(|(_, v)| v.to_f64().unwrap_or(0.0))
        .collect();
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    for ((key, v), fv) in series.iter().zip(values) {
        writeln!(out, "{:<10} {} {}", key.to_string(), bar(fv, max), money(*v, 0))?;
    }
    Ok(())
}

fn bar(value: f64, max: f64) -> String {
    let n = if max > 0.0 && value > 0.0 {
        ((value / max) * BAR_WIDTH as f64).round() as usize
    } else {
        0
    };
    format!("{:<width$}", "█".repeat(n), width = BAR_WIDTH)
}

/// `1234567.891` -> `1,234,567.89` при `dp = 2`.
fn money(v: Decimal, dp: u32) -> String {
    let s = v.round_dp(dp).to_string();
    let (sign, s) = s.strip_prefix('-').map_or(("", s.as_str()), |rest| ("-", rest));
    let (int, frac) = s.split_once('.').unwrap_or((s, ""));
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let frac = if dp == 0 {
        String::new()
    } else {
        format!(".{:0<width$}", frac, width = dp as usize)
    };
    format!("{sign}{grouped}{frac}")
}

fn money_f64(v: f64) -> String {
    Decimal::from_f64_retain(v)
        .map(|d| money(d, 0))
        .unwrap_or_else(|| format!("{v:.0}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(money(Decimal::new(123456789, 2), 2), "1,234,567.89");
        assert_eq!(money(Decimal::from(10500), 0), "10,500");
        assert_eq!(money(Decimal::from(999), 0), "999");
        assert_eq!(money(Decimal::new(-12345, 1), 0), "-1,234");
        assert_eq!(money(Decimal::new(25, 1), 2), "2.50");
        assert_eq!(money_f64(9450.4), "9,450");
    }

    #[test]
    fn bar_scales_to_max() {
        assert_eq!(bar(10.0, 10.0).trim_end().chars().count(), BAR_WIDTH);
        assert_eq!(bar(5.0, 10.0).trim_end().chars().count(), BAR_WIDTH / 2);
        assert_eq!(bar(0.0, 0.0).trim_end(), "");
    }
}
