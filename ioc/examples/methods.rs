use weft_ioc::{
  value, Arguments, ClassBuilder, Container, Injectable, Parameter, Parameters, Result, Signature,
};

struct Clock;

impl Injectable for Clock {
  fn class_name() -> &'static str {
    "Clock"
  }

  fn construct(_args: &Arguments) -> Result<Self> {
    Ok(Clock)
  }
}

struct ReportJob;

impl Injectable for ReportJob {
  fn class_name() -> &'static str {
    "ReportJob"
  }

  fn construct(_args: &Arguments) -> Result<Self> {
    Ok(ReportJob)
  }

  fn describe(class: ClassBuilder) -> ClassBuilder {
    class.method::<ReportJob, _>(
      "handle",
      Signature::new()
        .param(Parameter::of::<Clock>("clock"))
        .param(Parameter::new("format").with_default("pdf")),
      |_job, args| {
        let format = args.get::<&str>("format")?;
        Ok(value(format!("report rendered as {}", format)))
      },
    )
  }
}

fn main() -> Result<()> {
  let container = Container::new();
  container.register::<Clock>();
  container.register::<ReportJob>();

  // The clock is injected; `format` falls back to its default.
  let report = container.call("ReportJob@handle", Parameters::new(), None)?;
  println!("{}", report.downcast_ref::<String>().map(String::as_str).unwrap_or_default());

  // Named parameters win over defaults and the container.
  let report = container.call("ReportJob", Parameters::new().with("format", "csv"), Some("handle"))?;
  println!("{}", report.downcast_ref::<String>().map(String::as_str).unwrap_or_default());

  // A method binding replaces the call entirely.
  container.bind_method("ReportJob@handle", |_, _| Ok(value(String::from("report served from cache"))));
  let report = container.call("ReportJob@handle", Parameters::new(), None)?;
  println!("{}", report.downcast_ref::<String>().map(String::as_str).unwrap_or_default());
  Ok(())
}
