/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Join algorithms over row lists.
//!
//! Every algorithm is a lazy iterator adapter: work happens only as the
//! returned [`shared::RowList`] is pulled, and each one owns the
//! [`shared::RowBuilder`] it is given for the lifetime of that list.
//!
//! | algorithm | materializes | output order |
//! |-----------|--------------|--------------|
//! | [`hash_join`] | left operand (build side) | right (probe) order |
//! | [`merge_join`] | one equal-key run per side | join key order |
//! | [`substitution_join`] | nothing | left order, then storage order |
//! | [`nested_loop_join`] | right operand | left order, then right order |

pub mod hash_join;
pub mod merge_join;
pub mod nested_loop_join;
pub mod star_join;
pub mod substitution_join;

pub use hash_join::hash_join;
pub use merge_join::{merge_join, natural_order};
pub use nested_loop_join::nested_loop_join;
pub use star_join::star_join;
pub use substitution_join::substitution_join;
