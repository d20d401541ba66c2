use newsletter::configuration::get_configuration;
use newsletter::startup::Application;
use telemetry::{flush_tracer, get_subscriber, init_subscriber, init_tracer};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration().await?;

    let tracer = init_tracer(&configuration.telemetry)?;
    let subscriber = get_subscriber(
        configuration.telemetry.dataset_name.clone(),
        "info".into(),
        std::io::stdout,
        &configuration.telemetry,
        &tracer,
    );
    init_subscriber(subscriber);

    let application = Application::build(configuration).await?;
    let outcome = application.run_until_stopped().await;

    flush_tracer(&tracer);
    outcome?;

    Ok(())
}
