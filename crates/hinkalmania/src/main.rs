fn main() {
    hinkalmania::run();
}
