//! Import order: each file is loaded only after every table it references.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use crate::error::ImportError;

/// One CSV file and the table it fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    Users,
    Categories,
    Genres,
    Titles,
    Reviews,
    Comments,
    GenreTitles,
}

impl Table {
    pub const ALL: [Table; 7] = [
        Table::Users,
        Table::Categories,
        Table::Genres,
        Table::Titles,
        Table::Reviews,
        Table::Comments,
        Table::GenreTitles,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Table::Users => "users.csv",
            Table::Categories => "category.csv",
            Table::Genres => "genre.csv",
            Table::Titles => "titles.csv",
            Table::Reviews => "review.csv",
            Table::Comments => "comments.csv",
            Table::GenreTitles => "genre_title.csv",
        }
    }

    pub fn table_name(self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Categories => "categories",
            Table::Genres => "genres",
            Table::Titles => "titles",
            Table::Reviews => "reviews",
            Table::Comments => "comments",
            Table::GenreTitles => "genre_titles",
        }
    }

    /// Tables whose ids appear as foreign keys in this file.
    pub fn depends_on(self) -> &'static [Table] {
        match self {
            Table::Users | Table::Categories | Table::Genres => &[],
            Table::Titles => &[Table::Categories],
            Table::Reviews => &[Table::Titles, Table::Users],
            Table::Comments => &[Table::Reviews, Table::Users],
            Table::GenreTitles => &[Table::Titles, Table::Genres],
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

impl FromStr for Table {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Table::ALL
            .into_iter()
            .find(|t| t.table_name() == s)
            .ok_or_else(|| format!("unknown table `{s}`"))
    }
}

/// Kahn's algorithm over `node -> dependencies`. Dependencies outside the
/// node set are ignored. Ties are broken by key order so the result is stable.
pub fn topological_order<K: Ord + Copy + fmt::Debug>(
    dependencies: &BTreeMap<K, Vec<K>>,
) -> Result<Vec<K>, ImportError> {
    let mut in_degree: BTreeMap<K, usize> = BTreeMap::new();
    for (node, deps) in dependencies {
        let known = deps
            .iter()
            .filter(|d| dependencies.contains_key(*d) && *d != node)
            .collect::<BTreeSet<_>>()
            .len();
        in_degree.insert(*node, known);
    }

    let mut queue: VecDeque<K> = in_degree
        .iter()
        .filter(|(_, deg)| **deg == 0)
        .map(|(node, _)| *node)
        .collect();
    let mut order = Vec::with_capacity(dependencies.len());

    while let Some(done) = queue.pop_front() {
        order.push(done);
        for (dependent, deps) in dependencies {
            if *dependent == done || !deps.contains(&done) {
                continue;
            }
            if let Some(degree) = in_degree.get_mut(dependent) {
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(*dependent);
                }
            }
        }
    }

    if order.len() != dependencies.len() {
        let remaining = dependencies
            .keys()
            .filter(|k| !order.contains(k))
            .map(|k| format!("{k:?}"))
            .collect();
        return Err(ImportError::DependencyCycle(remaining));
    }
    Ok(order)
}

/// Ordered list of tables to import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPlan {
    pub steps: Vec<Table>,
}

impl ImportPlan {
    pub fn new(tables: &[Table]) -> Result<Self, ImportError> {
        let dependencies = tables
            .iter()
            .map(|t| (*t, t.depends_on().to_vec()))
            .collect();
        Ok(Self {
            steps: topological_order(&dependencies)?,
        })
    }

    pub fn full() -> Result<Self, ImportError> {
        Self::new(&Table::ALL)
    }
}
