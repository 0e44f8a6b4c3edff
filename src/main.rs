use csv_demographics::error::DemographicsError;

fn main() {
    if let Err(err) = csv_demographics::run() {
        match err.downcast_ref::<DemographicsError>() {
            Some(DemographicsError::Usage(usage)) => print!("{usage}"),
            _ => eprintln!("error: {err:#}"),
        }
        std::process::exit(1);
    }
}
