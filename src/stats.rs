use crate::models::{AppData, DailyPoint, StatsResponse, WeeklyAveragePoint, WeeklyPoint};
use crate::tracker::geo::round3;
use chrono::{Datelike, Duration, Local, NaiveDate};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default)]
struct DayTotals {
    runs: u32,
    distance_km: f64,
    running_time_sec: u64,
}

pub fn build_stats(data: &AppData) -> StatsResponse {
    build_stats_at(Local::now().date_naive(), data)
}

pub fn build_stats_at(today: NaiveDate, data: &AppData) -> StatsResponse {
    const WEEK_COUNT: usize = 8;

    let days = totals_by_day(data);
    let day = |date: NaiveDate| days.get(&date_key(date)).copied().unwrap_or_default();

    let mut last_7_days = Vec::with_capacity(7);
    for offset in (0..7).rev() {
        let date = today - Duration::days(offset as i64);
        let totals = day(date);
        last_7_days.push(DailyPoint {
            date: date.to_string(),
            runs: totals.runs,
            distance_km: round3(totals.distance_km),
            running_time_sec: totals.running_time_sec,
        });
    }

    let current_week_start = week_start(today);
    let mut weekly_totals = Vec::with_capacity(WEEK_COUNT);
    let mut weekly_averages = Vec::with_capacity(WEEK_COUNT);

    for offset in (0..WEEK_COUNT).rev() {
        let start = current_week_start - Duration::weeks(offset as i64);
        let end = start + Duration::days(6);

        let mut week = DayTotals::default();
        for day_offset in 0..7 {
            let totals = day(start + Duration::days(day_offset));
            week.runs = week.runs.saturating_add(totals.runs);
            week.distance_km += totals.distance_km;
            week.running_time_sec = week.running_time_sec.saturating_add(totals.running_time_sec);
        }

        let days_counted = if today < start {
            0
        } else if today > end {
            7
        } else {
            (today - start).num_days() as u8 + 1
        };

        let denom = if days_counted == 0 { 1.0 } else { f64::from(days_counted) };

        weekly_totals.push(WeeklyPoint {
            week: week_label(start),
            start_date: start.to_string(),
            end_date: end.to_string(),
            runs: week.runs,
            distance_km: round3(week.distance_km),
            running_time_sec: week.running_time_sec,
        });

        weekly_averages.push(WeeklyAveragePoint {
            week: week_label(start),
            days_counted,
            avg_distance_km: round3(week.distance_km / denom),
            avg_running_time_sec: week.running_time_sec as f64 / denom,
        });
    }

    StatsResponse {
        total_runs: data.runs.len(),
        total_distance_km: round3(data.runs.iter().map(|run| run.distance_km).sum()),
        last_7_days,
        weekly_totals,
        weekly_averages,
    }
}

fn totals_by_day(data: &AppData) -> BTreeMap<String, DayTotals> {
    let mut days: BTreeMap<String, DayTotals> = BTreeMap::new();
    for run in &data.runs {
        let entry = days.entry(run.date.clone()).or_default();
        entry.runs = entry.runs.saturating_add(1);
        entry.distance_km += run.distance_km;
        entry.running_time_sec = entry.running_time_sec.saturating_add(run.running_time_sec);
    }
    days
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}
