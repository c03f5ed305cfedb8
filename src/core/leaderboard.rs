use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub score: i64,
}

impl Record {
    pub fn new(name: impl Into<String>, score: i64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedRow {
    pub rank: usize,
    pub name: String,
    pub score: i64,
}

/// Leaderboard backing list. Storage order is whatever the last sort left
/// plus any records appended since.
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    records: Vec<Record>,
}

impl Leaderboard {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    #[cfg(test)]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Removes the last record in storage order, not the lowest ranked one.
    pub fn pop(&mut self) -> Option<Record> {
        self.records.pop()
    }

    pub fn sort_descending(&mut self) {
        self.records.sort_by(|a, b| b.score.cmp(&a.score));
    }

    /// Sorts in place and projects 1-based ranks.
    pub fn render(&mut self) -> Vec<RankedRow> {
        self.sort_descending();
        self.records
            .iter()
            .enumerate()
            .map(|(idx, record)| RankedRow {
                rank: idx + 1,
                name: record.name.clone(),
                score: record.score,
            })
            .collect()
    }
}

/// Picks a name from `pool` and a score in `[0, 100)`.
/// Returns `None` for an empty pool.
pub fn random_record<R: Rng>(rng: &mut R, pool: &[String]) -> Option<Record> {
    if pool.is_empty() {
        return None;
    }

    let name = &pool[rng.random_range(0..pool.len())];
    let score = rng.random_range(0..100);
    Some(Record::new(name.clone(), score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample() -> Leaderboard {
        Leaderboard::new(vec![
            Record::new("Alice", 92),
            Record::new("Bob", 87),
            Record::new("Charlie", 81),
            Record::new("Diana", 76),
        ])
    }

    #[test]
    fn already_sorted_board_keeps_its_order() {
        let rows = sample().render();
        let names: Vec<&str> = rows.iter().map(|row| row.name.as_str()).collect();
        assert_eq!(names, ["Alice", "Bob", "Charlie", "Diana"]);
        let ranks: Vec<usize> = rows.iter().map(|row| row.rank).collect();
        assert_eq!(ranks, [1, 2, 3, 4]);
    }

    #[test]
    fn render_orders_scores_non_increasing() {
        let mut board = sample();
        board.push(Record::new("Emma", 95));
        board.push(Record::new("John", 3));
        board.push(Record::new("Lisa", 87));

        let rows = board.render();
        assert_eq!(rows[0].name, "Emma");
        assert_eq!(rows[0].rank, 1);
        assert!(rows.windows(2).all(|pair| pair[0].score >= pair[1].score));
        assert_eq!(rows.last().map(|row| row.name.as_str()), Some("John"));
    }

    #[test]
    fn render_reorders_backing_list() {
        let mut board = Leaderboard::new(vec![Record::new("Low", 1), Record::new("High", 99)]);
        board.render();
        assert_eq!(board.records()[0].name, "High");
    }

    #[test]
    fn pop_removes_storage_order_last() {
        let mut board = sample();
        board.push(Record::new("Top", 100));
        let removed = board.pop();
        assert_eq!(removed.map(|r| r.name), Some("Top".to_string()));
        assert_eq!(board.len(), 4);
    }

    #[test]
    fn pop_on_empty_is_none() {
        let mut board = Leaderboard::default();
        assert!(board.pop().is_none());
        assert!(board.is_empty());
    }

    #[test]
    fn random_record_draws_from_pool_and_range() {
        let pool = vec!["Emma".to_string(), "James".to_string()];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let record = random_record(&mut rng, &pool).expect("non-empty pool");
            assert!(pool.contains(&record.name));
            assert!((0..100).contains(&record.score));
        }
        assert!(random_record(&mut rng, &[]).is_none());
    }
}
