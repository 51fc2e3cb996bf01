use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total_users: i64,
    pub total_content: i64,
    pub total_content_this_month: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyStat {
    pub year: i32,
    pub month: u32,
    pub total_content: i64,
    pub total_users: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentPerMonth {
    pub total_users: i64,
    pub monthly_stats: Vec<MonthlyStat>,
}

/// Spread grouped `(month, count)` rows over twelve calendar buckets.
///
/// Months missing from either input stay at zero. Rows with a month
/// outside 1..=12 are dropped.
pub fn monthly_buckets(year: i32, content: &[(i32, i64)], users: &[(i32, i64)]) -> Vec<MonthlyStat> {
    let mut stats: Vec<MonthlyStat> = (1..=12)
        .map(|month| MonthlyStat {
            year,
            month,
            total_content: 0,
            total_users: 0,
        })
        .collect();

    for &(month, count) in content {
        if let Some(bucket) = bucket_mut(&mut stats, month) {
            bucket.total_content = count;
        }
    }
    for &(month, count) in users {
        if let Some(bucket) = bucket_mut(&mut stats, month) {
            bucket.total_users = count;
        }
    }

    stats
}

fn bucket_mut(stats: &mut [MonthlyStat], month: i32) -> Option<&mut MonthlyStat> {
    if !(1..=12).contains(&month) {
        return None;
    }
    stats.get_mut((month - 1) as usize)
}
