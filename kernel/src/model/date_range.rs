use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

// 宿泊期間・検索期間を表す日付範囲。start < end のみを許す。
// 予約同士の重複判定は DB 側の包含的な述語
// （check_in_date <= end AND check_out_date >= start）で行う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if start >= end {
            return Err(AppError::UnprocessableEntity(format!(
                "開始日（{start}）は終了日（{end}）より前である必要があります。"
            )));
        }
        Ok(Self { start, end })
    }

    // 期間指定なしの在庫縮小時に使う実質無制限の範囲
    pub fn unbounded() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2100, 1, 1).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_rejects_inverted_or_empty() {
        let d1 = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();

        assert!(DateRange::new(d1, d2).is_ok());
        assert!(DateRange::new(d2, d1).is_err());
        assert!(DateRange::new(d1, d1).is_err());
    }

    #[test]
    fn test_unbounded_covers_a_century() {
        let range = DateRange::unbounded();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2100, 1, 1).unwrap());
    }
}
