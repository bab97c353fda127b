use crate::models::health_data::{HealthRecord, HealthSummary};

pub fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Default)]
struct SummaryTotals {
    steps: i64,
    sleep_hours: f64,
    heart_rate: f64,
    water_intake: f64,
    calories: f64,
    count: usize,
}

impl SummaryTotals {
    fn add(mut self, record: &HealthRecord) -> Self {
        self.steps = self.steps.saturating_add(record.steps);
        self.sleep_hours += record.sleep_hours;
        self.heart_rate += record.heart_rate;
        self.water_intake += record.water_intake;
        self.calories += record.calories;
        self.count += 1;
        self
    }

    fn finish(self) -> HealthSummary {
        let avg_heart_rate = if self.count == 0 {
            0.0
        } else {
            round_to_one_decimal(self.heart_rate / self.count as f64)
        };

        HealthSummary {
            total_steps: self.steps,
            total_sleep: round_to_one_decimal(self.sleep_hours),
            avg_heart_rate,
            total_water: self.water_intake,
            total_calories: self.calories,
            days_tracked: self.count,
        }
    }
}

/// Single pass over a user's recent records.
pub fn summarize_records<'a, I>(records: I) -> HealthSummary
where
    I: IntoIterator<Item = &'a HealthRecord>,
{
    records
        .into_iter()
        .fold(SummaryTotals::default(), SummaryTotals::add)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn record(steps: i64, heart_rate: f64, sleep_hours: f64, water_intake: f64, calories: f64) -> HealthRecord {
        HealthRecord {
            id: String::new(),
            user_id: "u1".to_string(),
            steps,
            heart_rate,
            sleep_hours,
            water_intake,
            calories,
            created_at: None,
            updated_at: None,
            extra: Map::new(),
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize_records(&Vec::<HealthRecord>::new());
        assert_eq!(
            summary,
            HealthSummary {
                total_steps: 0,
                total_sleep: 0.0,
                avg_heart_rate: 0.0,
                total_water: 0.0,
                total_calories: 0.0,
                days_tracked: 0,
            }
        );
    }

    #[test]
    fn test_two_days() {
        let records = vec![
            record(100, 60.0, 7.0, 2.0, 500.0),
            record(200, 80.0, 8.0, 3.0, 600.0),
        ];
        let summary = summarize_records(&records);
        assert_eq!(
            summary,
            HealthSummary {
                total_steps: 300,
                total_sleep: 15.0,
                avg_heart_rate: 70.0,
                total_water: 5.0,
                total_calories: 1100.0,
                days_tracked: 2,
            }
        );
    }

    #[test]
    fn test_rounding() {
        let records = vec![
            record(0, 60.0, 7.33, 0.0, 0.0),
            record(0, 61.0, 0.0, 0.0, 0.0),
            record(0, 61.0, 0.0, 0.0, 0.0),
        ];
        let summary = summarize_records(&records);
        assert_eq!(summary.total_sleep, 7.3);
        assert_eq!(summary.avg_heart_rate, 60.7);
        assert_eq!(summary.days_tracked, 3);
    }

    #[test]
    fn test_step_total_saturates() {
        let records = vec![
            record(i64::MAX, 0.0, 0.0, 0.0, 0.0),
            record(i64::MAX, 0.0, 0.0, 0.0, 0.0),
            record(5, 0.0, 0.0, 0.0, 0.0),
        ];
        let summary = summarize_records(&records);
        assert_eq!(summary.total_steps, i64::MAX);
        assert_eq!(summary.days_tracked, 3);

        let negative = vec![record(i64::MIN, 0.0, 0.0, 0.0, 0.0), record(-1, 0.0, 0.0, 0.0, 0.0)];
        assert_eq!(summarize_records(&negative).total_steps, i64::MIN);
    }

    #[test]
    fn test_order_does_not_change_totals() {
        let forward = vec![record(1, 50.0, 1.0, 1.0, 1.0), record(2, 70.0, 2.0, 2.0, 2.0)];
        let backward: Vec<HealthRecord> = forward.iter().rev().cloned().collect();
        assert_eq!(summarize_records(&forward), summarize_records(&backward));
    }
}
