fn main() {
    opk::run_cli();
}
