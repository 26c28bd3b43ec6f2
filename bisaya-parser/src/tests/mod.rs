mod test_comments_and_decrement;
mod test_diagnostics;
