//! Variable management for SAT encoding

use crate::error::{InvariantError, Result};
use std::collections::HashMap;

/// Types of variables used in the SAT encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableType {
    /// Node at this position belongs to the subset
    Node(usize),
    /// Register of a sequential counter: at least `count` of the first
    /// `item + 1` counted literals are true
    Counter {
        counter: usize,
        item: usize,
        count: usize,
    },
}

/// Manages SAT variables and their mapping to integers
#[derive(Debug)]
pub struct VariableManager {
    /// Map from variable type to SAT variable ID (positive integer)
    variable_map: HashMap<VariableType, i32>,
    /// Next available variable ID
    next_id: i32,
    order: usize,
    counters: usize,
}

impl VariableManager {
    /// Create a variable manager for a graph with `order` nodes.
    ///
    /// Node variables get IDs `1..=order` in position order.
    pub fn new(order: usize) -> Self {
        let mut manager = Self {
            variable_map: HashMap::new(),
            next_id: 1,
            order,
            counters: 0,
        };
        for node in 0..order {
            manager
                .variable_map
                .insert(VariableType::Node(node), manager.next_id);
            manager.next_id += 1;
        }
        manager
    }

    /// Get or create a variable ID for the given variable type
    pub fn get_variable(&mut self, var_type: VariableType) -> Result<i32> {
        if let Some(&id) = self.variable_map.get(&var_type) {
            return Ok(id);
        }

        self.validate_variable(&var_type)?;

        let id = self.next_id;
        self.next_id += 1;
        self.variable_map.insert(var_type, id);
        Ok(id)
    }

    pub fn node_variable(&mut self, node: usize) -> Result<i32> {
        self.get_variable(VariableType::Node(node))
    }

    /// Node variables of every node, in position order
    pub fn node_variables(&mut self) -> Result<Vec<i32>> {
        (0..self.order).map(|node| self.node_variable(node)).collect()
    }

    /// Reserve a fresh counter id; registers of different counters never alias
    pub fn new_counter(&mut self) -> usize {
        self.counters += 1;
        self.counters - 1
    }

    pub fn counter_variable(&mut self, counter: usize, item: usize, count: usize) -> Result<i32> {
        self.get_variable(VariableType::Counter {
            counter,
            item,
            count,
        })
    }

    /// Get the total number of variables created
    pub fn variable_count(&self) -> usize {
        (self.next_id - 1) as usize
    }

    fn validate_variable(&self, var_type: &VariableType) -> Result<()> {
        match *var_type {
            VariableType::Node(node) => {
                if node >= self.order {
                    return Err(InvariantError::Backend(format!(
                        "node variable {} out of bounds (order: {})",
                        node, self.order
                    )));
                }
            }
            VariableType::Counter { counter, count, .. } => {
                if counter >= self.counters {
                    return Err(InvariantError::Backend(format!(
                        "counter {} was never reserved",
                        counter
                    )));
                }
                if count == 0 {
                    return Err(InvariantError::Backend(
                        "counter registers start at count 1".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Get statistics about variable usage
    pub fn statistics(&self) -> VariableStatistics {
        let counter_variables = self
            .variable_map
            .keys()
            .filter(|var| matches!(var, VariableType::Counter { .. }))
            .count();

        VariableStatistics {
            total_variables: self.variable_count(),
            node_variables: self.order,
            counter_variables,
        }
    }
}

/// Statistics about variable usage
#[derive(Debug, Clone)]
pub struct VariableStatistics {
    pub total_variables: usize,
    pub node_variables: usize,
    pub counter_variables: usize,
}

impl std::fmt::Display for VariableStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Variable Statistics:")?;
        writeln!(f, "  Total variables: {}", self.total_variables)?;
        writeln!(f, "  Node variables: {}", self.node_variables)?;
        writeln!(f, "  Counter variables: {}", self.counter_variables)?;
        Ok(())
    }
}
