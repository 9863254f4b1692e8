fn main() {
    aipricecast::cli::run();
}
