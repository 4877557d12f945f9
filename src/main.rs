fn main() {
    pkgbar::run_cli();
}
