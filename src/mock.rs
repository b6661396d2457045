//! Built-in sample records
//!
//! A small working set used when no data file is supplied, deliberately
//! heterogeneous: statuses in both Korean and coded form, synonym field
//! names, numeric strings, and placeholder sentinels, matching the shapes
//! real data files arrive in.

use serde_json::json;

use canopy_query::ProjectRecord;

/// The built-in sample project set
pub fn sample_projects() -> Vec<ProjectRecord> {
    [
        json!({
            "id": 101,
            "title": "Afghanistan Climate Resilience Fund",
            "description": "Investment project strengthening climate resilience in vulnerable districts.",
            "country_region": "Afghanistan",
            "institution": "Green Climate Fund",
            "site": "GCF",
            "theme_area": "Adaptation",
            "loan_type": "Grant",
            "status": "진행 중",
            "budget": 9_500_000,
            "co_financing": null,
            "start_date": "2022-04-01",
            "end_date": "2025-04-01",
            "ownerEmail": "aaa@aaa.com",
        }),
        json!({
            "id": 102,
            "title": "Bangladesh Coastal Protection Program",
            "description": "Embankments and drainage works reducing coastal erosion and flood damage.",
            "country_region": "Bangladesh",
            "institution": "World Bank",
            "site": "WB",
            "theme_area": "Disaster risk reduction",
            "loan_type": "Concessional loan",
            "status": "진행 중",
            "budget": 120_000_000,
            "co_financing": 35_000_000,
            "start_date": "2020-07-15",
            "end_date": "2026-07-15",
            "ownerEmail": "aaa@aaa.com",
        }),
        json!({
            "id": 103,
            "projectName": "Brunei Renewable Energy Pilot",
            "description": "Pilot deployment of rooftop solar and grid storage.",
            "country": "Brunei Darussalam",
            "organization": "GEF",
            "site": "GEF",
            "theme_area": "Mitigation",
            "loanType": "Grant",
            "status": "예정",
            "total_amount": "4500000",
            "cofinancing": 0,
            "startDate": "2026-01-01T00:00:00",
            "ownerEmail": "bbb@bbb.com",
        }),
        json!({
            "id": 104,
            "title": "Regional Climate Data Platform",
            "description": "Integrated climate data and analytics platform for Southeast Asia.",
            "country_region": "Hong Kong",
            "institution": "UNDP",
            "site": "UNDP",
            "theme_area": "Cross-cutting",
            "loan_type": "nan",
            "status": "완료",
            "budget": 15_000_000,
            "co_financing": "NaN",
            "start_date": "2017-03-01",
            "end_date": "2019-09-01",
            "duration_days": 914,
            "ownerEmail": "admin@aaa.com",
        }),
        json!({
            "id": 105,
            "title": "Sahel Agroforestry Initiative",
            "description": "Forest restoration and agricultural productivity support across the Sahel.",
            "country_region": "Bhutan",
            "institution": "IFAD",
            "site": "IFAD",
            "theme_area": "Adaptation",
            "loan_type": "Blended finance",
            "status": "COMPLETED",
            "budget": 62_000_000,
            "co_financing": 8_000_000,
            "start_date": "2015-05-01",
            "end_date": "2021-11-01",
            "ownerEmail": "bbb@bbb.com",
        }),
    ]
    .into_iter()
    .filter_map(ProjectRecord::from_value)
    .collect()
}
