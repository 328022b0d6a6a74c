use std::sync::Arc;
use weft_ioc::{Arguments, ClassBuilder, Container, Injectable, Parameter, Result, Signature, Value};

const FILESYSTEM: &str = "contracts.Filesystem";

trait Disk: Send + Sync {
  fn name(&self) -> &'static str;
}

struct LocalDisk;
struct S3Disk;

impl Disk for LocalDisk {
  fn name(&self) -> &'static str {
    "local"
  }
}

impl Disk for S3Disk {
  fn name(&self) -> &'static str {
    "s3"
  }
}

impl Injectable for LocalDisk {
  fn class_name() -> &'static str {
    "disks.Local"
  }

  fn construct(_args: &Arguments) -> Result<Self> {
    Ok(LocalDisk)
  }

  fn describe(class: ClassBuilder) -> ClassBuilder {
    class.implements(FILESYSTEM)
  }
}

impl Injectable for S3Disk {
  fn class_name() -> &'static str {
    "disks.S3"
  }

  fn construct(_args: &Arguments) -> Result<Self> {
    Ok(S3Disk)
  }

  fn describe(class: ClassBuilder) -> ClassBuilder {
    class.implements(FILESYSTEM)
  }
}

// Both controllers ask for "a filesystem"; the container decides which.
struct PhotoController {
  disk: Value,
}

struct VideoController {
  disk: Value,
}

impl Injectable for PhotoController {
  fn class_name() -> &'static str {
    "controllers.Photo"
  }

  fn signature() -> Signature {
    Signature::new().param(Parameter::new("disk").typed(FILESYSTEM))
  }

  fn construct(args: &Arguments) -> Result<Self> {
    Ok(PhotoController { disk: args.value("disk")? })
  }
}

impl Injectable for VideoController {
  fn class_name() -> &'static str {
    "controllers.Video"
  }

  fn signature() -> Signature {
    Signature::new().param(Parameter::new("disk").typed(FILESYSTEM))
  }

  fn construct(args: &Arguments) -> Result<Self> {
    Ok(VideoController { disk: args.value("disk")? })
  }
}

fn disk_name(disk: &Value) -> &'static str {
  if let Some(local) = disk.downcast_ref::<LocalDisk>() {
    local.name()
  } else if let Some(s3) = disk.downcast_ref::<S3Disk>() {
    s3.name()
  } else {
    "unknown"
  }
}

fn main() -> Result<()> {
  let container = Arc::new(Container::new());
  container.reflector().register_interface(FILESYSTEM);
  container.register::<LocalDisk>();
  container.register::<S3Disk>();
  container.register::<PhotoController>();
  container.register::<VideoController>();

  container.bind_class(FILESYSTEM, LocalDisk::class_name())?;
  container
    .when(VideoController::class_name())
    .needs(FILESYSTEM)
    .give_class(S3Disk::class_name())?;

  let photos = container.make_as::<PhotoController>(PhotoController::class_name())?;
  let videos = container.make_as::<VideoController>(VideoController::class_name())?;

  println!("Photos are stored on: {}", disk_name(&photos.disk));
  println!("Videos are stored on: {}", disk_name(&videos.disk));
  assert_eq!(disk_name(&photos.disk), "local");
  assert_eq!(disk_name(&videos.disk), "s3");
  Ok(())
}
