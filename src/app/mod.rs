//! Application use cases.

mod subvention;

pub use subvention::{
    subvention_count, subvention_delete, subvention_find_all, subvention_find_by_id,
    subvention_insert, subvention_sum_amount, subvention_update,
};
