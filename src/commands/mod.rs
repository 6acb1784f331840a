//! Command implementations.

mod common;
mod generate;
mod print;

pub use common::{
    generator_path,
    resolve_repo_root,
};
pub use generate::{
    GenerateArgs,
    generate,
    generate_with,
};
pub use print::{
    print_dependencies,
    print_outputs,
};
