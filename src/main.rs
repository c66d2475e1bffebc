use anyhow::Result;

fn main() -> Result<()> {
    delivery_desk::cli::run()
}
