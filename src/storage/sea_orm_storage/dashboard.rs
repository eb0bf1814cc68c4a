//! 仪表盘聚合查询

use super::{SeaOrmStorage, db_err};
use crate::entity::attendance::{Column, Entity as AttendanceEntity};
use crate::errors::Result;
use crate::models::dashboard::entities::AttendanceDayCount;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, QuerySelect};

#[derive(Debug, FromQueryResult)]
struct DayStatusRow {
    date: i64,
    status: String,
    cnt: i64,
}

/// 按计数倒序、id 升序排名并截断
pub(crate) fn rank_by_count<T>(
    mut rows: Vec<T>,
    key: impl Fn(&T) -> (i64, i64),
    limit: u64,
) -> Vec<T> {
    rows.sort_by(|a, b| {
        let (a_id, a_cnt) = key(a);
        let (b_id, b_cnt) = key(b);
        b_cnt.cmp(&a_cnt).then(a_id.cmp(&b_id))
    });
    rows.truncate(limit as usize);
    rows
}

impl SeaOrmStorage {
    /// [from, to] 区间内按天、按状态计数
    pub async fn attendance_day_counts_impl(
        &self,
        from: i64,
        to: i64,
    ) -> Result<Vec<AttendanceDayCount>> {
        let rows = AttendanceEntity::find()
            .select_only()
            .column(Column::Date)
            .column(Column::Status)
            .column_as(Expr::expr(Func::count(Expr::col(Column::Id))), "cnt")
            .filter(Column::Date.between(from, to))
            .group_by(Column::Date)
            .group_by(Column::Status)
            .into_model::<DayStatusRow>()
            .all(&self.db)
            .await
            .map_err(db_err("Failed to aggregate attendance"))?;

        Ok(rows
            .into_iter()
            .map(|row| AttendanceDayCount {
                day: row.date,
                status: row.status,
                count: row.cnt,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_by_count_orders_and_truncates() {
        let rows = vec![(1, 2), (2, 5), (3, 5), (4, 1), (5, 3)];
        let ranked = rank_by_count(rows, |r| *r, 3);
        assert_eq!(ranked, vec![(2, 5), (3, 5), (5, 3)]);
    }

    #[test]
    fn test_rank_by_count_with_fewer_rows_than_limit() {
        let ranked = rank_by_count(vec![(9, 1)], |r| *r, 5);
        assert_eq!(ranked, vec![(9, 1)]);
    }
}
