//! Nuspec manifest parsing and generation.
//!
//! Only the fields the package model carries are read; everything else in
//! the manifest is ignored. Namespaces are ignored by matching local names.

use std::collections::HashSet;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use moo_core::constraint::{Operator, VersionConstraint};
use moo_core::dependency::PackageDependency;
use moo_core::package::{Package, PackageDetails, PackageLocation};
use moo_core::version::PackageVersion;
use moo_util::errors::{MooError, MooResult};

const NUSPEC_NAMESPACE: &str = "http://schemas.microsoft.com/packaging/2010/07/nuspec.xsd";

/// The parts of a `.nuspec` manifest moo understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nuspec {
    pub id: String,
    pub version: PackageVersion,
    pub details: PackageDetails,
    pub dependencies: Vec<PackageDependency>,
}

impl Nuspec {
    pub fn into_package(self, location: PackageLocation) -> Package {
        Package::new(self.id, self.version)
            .with_details(self.details)
            .with_dependencies(self.dependencies)
            .with_location(location)
    }

    pub fn from_package(package: &Package) -> Self {
        Self {
            id: package.id.clone(),
            version: package.version.clone(),
            details: package.details.clone(),
            dependencies: package.dependencies.clone(),
        }
    }
}

/// Build a dependency from a manifest `id` and `version` attribute.
///
/// NuGet interval notation (`[1.0,2.0)`, `[1.0]`, `(,2.0]`) converts to the
/// equivalent constraints. Anything else is dependency text as written, so a
/// bare version pins it exactly (`1.0` is `= 1.0`) and operators carry over
/// (`>= 1.0 < 2.0`, `~> 5.0`).
pub fn parse_dependency(id: &str, version: Option<&str>) -> MooResult<PackageDependency> {
    let id = id.trim();
    if id.is_empty() {
        return Err(MooError::Manifest {
            message: "dependency without an id".to_string(),
        });
    }
    let spec = version.map(str::trim).unwrap_or_default();
    if spec.is_empty() {
        return Ok(PackageDependency::any(id));
    }
    if spec.starts_with('[') || spec.starts_with('(') {
        return Ok(PackageDependency::new(id, interval_constraints(spec)?));
    }
    PackageDependency::parse(&format!("{id} {spec}"))
}

/// Convert NuGet interval notation into constraints.
fn interval_constraints(spec: &str) -> MooResult<Vec<VersionConstraint>> {
    let invalid = || MooError::format(format!("invalid version range '{spec}'"));

    let lower_inclusive = spec.starts_with('[');
    let upper_inclusive = spec.ends_with(']');
    if spec.len() < 2 || !(spec.ends_with(']') || spec.ends_with(')')) {
        return Err(invalid());
    }
    let inner = &spec[1..spec.len() - 1];

    let Some((lower, upper)) = inner.split_once(',') else {
        // `[1.0]` means exactly 1.0
        if !(lower_inclusive && upper_inclusive) {
            return Err(invalid());
        }
        let exact = VersionConstraint::new(Operator::EqualTo, PackageVersion::parse(inner)?);
        return Ok(vec![exact]);
    };

    let mut constraints = Vec::new();
    let lower = lower.trim();
    if !lower.is_empty() {
        let op = if lower_inclusive {
            Operator::GreaterThanOrEqualTo
        } else {
            Operator::GreaterThan
        };
        constraints.push(VersionConstraint::new(op, PackageVersion::parse(lower)?));
    }
    let upper = upper.trim();
    if !upper.is_empty() {
        let op = if upper_inclusive {
            Operator::LessThanOrEqualTo
        } else {
            Operator::LessThan
        };
        constraints.push(VersionConstraint::new(op, PackageVersion::parse(upper)?));
    }
    Ok(constraints)
}

/// Constraint text as written into a manifest `version` attribute.
fn constraint_text(dependency: &PackageDependency) -> String {
    dependency
        .constraints()
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn manifest_err(e: impl std::fmt::Display) -> MooError {
    MooError::Manifest {
        message: format!("Failed to parse nuspec XML: {e}"),
    }
}

/// Parse a nuspec XML document.
pub fn parse(xml: &str) -> MooResult<Nuspec> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut text_buf = String::new();

    let mut id: Option<String> = None;
    let mut version: Option<String> = None;
    let mut details = PackageDetails::default();
    let mut dependencies: Vec<PackageDependency> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                if tag == "dependency" {
                    push_dependency(e, &mut dependencies, &mut seen)?;
                }
                path.push(tag);
                text_buf.clear();
            }
            Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"dependency" {
                    push_dependency(e, &mut dependencies, &mut seen)?;
                }
            }
            Ok(Event::Text(ref e)) => {
                text_buf = e.unescape().map_err(manifest_err)?.to_string();
            }
            Ok(Event::CData(ref e)) => {
                text_buf = String::from_utf8_lossy(e.as_ref()).to_string();
            }
            Ok(Event::End(_)) => {
                let value = text_buf.trim().to_string();
                match path.join(">").as_str() {
                    "package>metadata>id" => id = Some(value),
                    "package>metadata>version" => version = Some(value),
                    "package>metadata>title" => details.title = Some(value),
                    "package>metadata>authors" => details.authors = Some(value),
                    "package>metadata>owners" => details.owners = Some(value),
                    "package>metadata>description" => details.description = Some(value),
                    "package>metadata>summary" => details.summary = Some(value),
                    "package>metadata>projectUrl" => details.project_url = Some(value),
                    "package>metadata>licenseUrl" => details.license_url = Some(value),
                    "package>metadata>tags" => {
                        details.tags = value.split_whitespace().map(str::to_string).collect();
                    }
                    _ => {}
                }
                path.pop();
                text_buf.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(manifest_err(e)),
            _ => {}
        }
    }

    let id = id.filter(|s| !s.is_empty()).ok_or_else(|| MooError::Manifest {
        message: "nuspec is missing <id>".to_string(),
    })?;
    let version = version.ok_or_else(|| MooError::Manifest {
        message: format!("nuspec for {id} is missing <version>"),
    })?;

    Ok(Nuspec {
        version: PackageVersion::parse(&version)?,
        id,
        details,
        dependencies,
    })
}

/// Read a `<dependency id=".." version=".."/>` element. The first occurrence
/// of an id wins when framework groups repeat it.
fn push_dependency(
    element: &BytesStart<'_>,
    dependencies: &mut Vec<PackageDependency>,
    seen: &mut HashSet<String>,
) -> MooResult<()> {
    let mut id = None;
    let mut version = None;
    for attr in element.attributes() {
        let attr = attr.map_err(manifest_err)?;
        let value = attr.unescape_value().map_err(manifest_err)?.to_string();
        match attr.key.local_name().as_ref() {
            b"id" => id = Some(value),
            b"version" => version = Some(value),
            _ => {}
        }
    }
    let id = id.unwrap_or_default();
    let dependency = parse_dependency(&id, version.as_deref())?;
    if seen.insert(dependency.id().to_ascii_lowercase()) {
        dependencies.push(dependency);
    }
    Ok(())
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> MooResult<()> {
    writer.write_event(event).map_err(|e| MooError::Manifest {
        message: format!("Failed to write nuspec XML: {e}"),
    })
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, tag: &str, value: &str) -> MooResult<()> {
    write(writer, Event::Start(BytesStart::new(tag)))?;
    write(writer, Event::Text(BytesText::new(value)))?;
    write(writer, Event::End(BytesEnd::new(tag)))
}

/// Render a nuspec document. Dependency versions are written as constraint
/// text, which [`parse`] reads back to the same constraints.
pub fn to_xml(nuspec: &Nuspec) -> MooResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    write(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
    )?;
    write(
        &mut writer,
        Event::Start(BytesStart::new("package").with_attributes([("xmlns", NUSPEC_NAMESPACE)])),
    )?;
    write(&mut writer, Event::Start(BytesStart::new("metadata")))?;

    write_text_element(&mut writer, "id", &nuspec.id)?;
    write_text_element(&mut writer, "version", &nuspec.version.to_string())?;

    let details = &nuspec.details;
    let optional = [
        ("title", &details.title),
        ("authors", &details.authors),
        ("owners", &details.owners),
        ("description", &details.description),
        ("summary", &details.summary),
        ("projectUrl", &details.project_url),
        ("licenseUrl", &details.license_url),
    ];
    for (tag, value) in optional {
        if let Some(value) = value {
            write_text_element(&mut writer, tag, value)?;
        }
    }
    if !details.tags.is_empty() {
        write_text_element(&mut writer, "tags", &details.tags.join(" "))?;
    }

    if !nuspec.dependencies.is_empty() {
        write(&mut writer, Event::Start(BytesStart::new("dependencies")))?;
        for dependency in &nuspec.dependencies {
            let mut element = BytesStart::new("dependency");
            element.push_attribute(("id", dependency.id()));
            let version = constraint_text(dependency);
            if !version.is_empty() {
                element.push_attribute(("version", version.as_str()));
            }
            write(&mut writer, Event::Empty(element))?;
        }
        write(&mut writer, Event::End(BytesEnd::new("dependencies")))?;
    }

    write(&mut writer, Event::End(BytesEnd::new("metadata")))?;
    write(&mut writer, Event::End(BytesEnd::new("package")))?;

    String::from_utf8(writer.into_inner()).map_err(|e| MooError::Manifest {
        message: format!("nuspec XML is not UTF-8: {e}"),
    })
}
