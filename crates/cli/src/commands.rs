//! Subcommands and their results.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::bail;
use clap::Subcommand;
use corelib::HashRing;
use replication::{BestEffortStrategy, ReplicationStrategy, SimpleStrategy};
use serde::Serialize;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the partition and owner of a key.
    Locate { key: String },

    /// List the owner of a key followed by its replica candidates.
    Replicas {
        key: String,

        /// Number of nodes to return, owner included.
        #[arg(short = 'n', long, default_value_t = 3)]
        count: usize,

        /// Return fewer nodes instead of failing on a small cluster.
        #[arg(long)]
        best_effort: bool,
    },

    /// Show partitions per node and the per-node cap.
    Loads,

    /// Preview which partitions change owner for a membership change.
    Movement {
        /// Node that would join.
        #[arg(long, conflicts_with = "remove", required_unless_present = "remove")]
        add: Option<String>,

        /// Node that would leave.
        #[arg(long)]
        remove: Option<String>,
    },
}

/// A partition whose owner changes.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub partition_id: u64,
    pub from: String,
    pub to: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CommandResult {
    Located {
        key: String,
        partition_id: u64,
        owner: String,
    },
    Replicas {
        key: String,
        partition_id: u64,
        nodes: Vec<String>,
    },
    Loads {
        average_load: f64,
        loads: BTreeMap<String, usize>,
    },
    Movement {
        partition_count: u64,
        moves: Vec<Move>,
    },
}

impl Command {
    pub fn execute(&self, ring: &mut HashRing<String>) -> anyhow::Result<CommandResult> {
        match self {
            Command::Locate { key } => Ok(CommandResult::Located {
                key: key.clone(),
                partition_id: ring.find_partition_id(key),
                owner: ring.locate_key(key)?.clone(),
            }),
            Command::Replicas {
                key,
                count,
                best_effort,
            } => {
                let nodes = if *best_effort {
                    BestEffortStrategy::new(*count).replicas_for_key(&*ring, key.as_bytes())?
                } else {
                    SimpleStrategy::new(*count).replicas_for_key(&*ring, key.as_bytes())?
                };
                Ok(CommandResult::Replicas {
                    key: key.clone(),
                    partition_id: ring.find_partition_id(key),
                    nodes: nodes.into_iter().cloned().collect(),
                })
            }
            Command::Loads => Ok(CommandResult::Loads {
                average_load: ring.average_load()?,
                loads: ring.load_distribution(),
            }),
            Command::Movement { add, remove } => {
                let before = ring.partition_table().to_vec();
                match (add, remove) {
                    (Some(name), None) => {
                        if !ring.add_node(name.clone())? {
                            bail!("{name} is already a member");
                        }
                    }
                    (None, Some(name)) => {
                        if !ring.remove_node(name)? {
                            bail!("{name} is not a member");
                        }
                    }
                    _ => bail!("pass exactly one of --add or --remove"),
                }
                Ok(CommandResult::Movement {
                    partition_count: ring.config().partition_count,
                    moves: diff(&before, ring.partition_table()),
                })
            }
        }
    }
}

/// Partitions whose owner differs between two tables of equal length.
pub fn diff(before: &[String], after: &[String]) -> Vec<Move> {
    before
        .iter()
        .zip(after)
        .enumerate()
        .filter(|(_, (from, to))| from != to)
        .map(|(id, (from, to))| Move {
            partition_id: id as u64,
            from: from.clone(),
            to: to.clone(),
        })
        .collect()
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResult::Located {
                key,
                partition_id,
                owner,
            } => writeln!(f, "{key}: partition {partition_id} -> {owner}"),
            CommandResult::Replicas {
                key,
                partition_id,
                nodes,
            } => writeln!(f, "{key}: partition {partition_id} -> [{}]", nodes.join(", ")),
            CommandResult::Loads {
                average_load,
                loads,
            } => {
                writeln!(f, "cap per node: {average_load}")?;
                for (name, load) in loads {
                    writeln!(f, "{name:>16} {load}")?;
                }
                Ok(())
            }
            CommandResult::Movement {
                partition_count,
                moves,
            } => {
                writeln!(f, "{} of {partition_count} partitions move", moves.len())?;
                for m in moves {
                    writeln!(f, "{:>8} {} -> {}", m.partition_id, m.from, m.to)?;
                }
                Ok(())
            }
        }
    }
}
