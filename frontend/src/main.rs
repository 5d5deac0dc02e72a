//! Theme script entry point.

fn main() {
    bearded_frontend::start();
}
