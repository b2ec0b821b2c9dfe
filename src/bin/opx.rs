fn main() {
    opk::run_opx();
}
