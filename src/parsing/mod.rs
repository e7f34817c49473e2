
//! Generic parsing machinery: source positions, a string cursor, the
//! operator table, and the shunting yard algorithm.

pub mod operator;
pub mod source;
pub mod shunting_yard;
pub mod tokenizer;
