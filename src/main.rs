fn main() {
    if let Err(err) = encuesta_salarial::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
