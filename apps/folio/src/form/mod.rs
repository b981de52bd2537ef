// Form state operations: repeated-entry lists, payload assembly and its memo.

pub mod assemble;
pub mod entries;
pub mod memo;

pub use assemble::{assemble_payload, split_list};
pub use entries::{Entry, EntryList, FormError};
pub use memo::PayloadMemo;
