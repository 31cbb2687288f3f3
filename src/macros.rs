#![allow(clippy::pub_with_shorthand)]

macro_rules! exit_on_error {
    ($result: expr, $exit: expr) => {
        match $result {
            Ok(val) => val,
            Err(err) => {
                log::error!("{err}");
                std::process::exit($exit);
            }
        }
    };
}

pub(crate) use exit_on_error;
