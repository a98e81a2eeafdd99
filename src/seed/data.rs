use anyhow::Result;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use crate::model::{Owner, Property, PropertyImage, PropertyTrace};
use crate::store::traits::Store;

fn owner(id: i32, name: &str, address: &str, photo: &str, birthday: (i32, u32, u32)) -> Owner {
    Owner {
        id_owner: id,
        name: name.to_string(),
        address: address.to_string(),
        photo: photo.to_string(),
        birthday: Utc
            .with_ymd_and_hms(birthday.0, birthday.1, birthday.2, 0, 0, 0)
            .unwrap(),
    }
}

fn property(
    id: i32,
    name: &str,
    address: &str,
    price: i64,
    code: &str,
    year: i32,
    owner_id: i32,
) -> Property {
    Property {
        id_property: id,
        name: name.to_string(),
        address: address.to_string(),
        price: Decimal::from(price),
        code_internal: code.to_string(),
        year,
        id_owner: owner_id,
    }
}

fn image(id: i32, property_id: i32, file: &str, enabled: bool) -> PropertyImage {
    PropertyImage {
        id_property_image: id,
        id_property: property_id,
        file: file.to_string(),
        enabled,
    }
}

fn trace(
    id: i32,
    property_id: i32,
    sale_date: (i32, u32, u32),
    name: &str,
    value: i64,
    tax: i64,
) -> PropertyTrace {
    PropertyTrace {
        id_property_trace: id,
        id_property: property_id,
        date_sale: Utc
            .with_ymd_and_hms(sale_date.0, sale_date.1, sale_date.2, 0, 0, 0)
            .unwrap(),
        name: name.to_string(),
        value: Decimal::from(value),
        tax: Decimal::from(tax),
    }
}

/// Demo data set for local development, derived from the listing seed of
/// the Cali, Colombia market. Inserted with explicit identities; the
/// store's counters advance past them automatically.
pub async fn load_seed_data<S: Store>(store: &S) -> Result<()> {
    let owners = vec![
        owner(
            1,
            "María García Rodríguez",
            "Carrera 15 #45-67, Barrio El Peñón, Cali",
            "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=400",
            (1985, 3, 15),
        ),
        owner(
            2,
            "Carlos Andrés Rodríguez",
            "Calle 70 #23-45, Barrio Granada, Cali",
            "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=400",
            (1978, 11, 22),
        ),
        owner(
            3,
            "Ana Lucía Martínez",
            "Av. Roosevelt #34-56, Barrio Normandía, Cali",
            "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=400",
            (1990, 7, 8),
        ),
        owner(
            4,
            "Luis Fernando Hernández",
            "Calle 5 #12-34, Barrio San Antonio, Cali",
            "https://images.unsplash.com/photo-1552058544-f2b08422138a?w=400",
            (1982, 12, 3),
        ),
        owner(
            5,
            "Sofía Elena López",
            "Carrera 100 #15-25, Ciudad Jardín, Cali",
            "https://images.unsplash.com/photo-1544005313-94ddf0286df2?w=400",
            (1987, 5, 20),
        ),
    ];

    let properties = vec![
        property(
            1,
            "Apartamento El Peñón",
            "Carrera 3 Oeste #1-45, El Peñón, Cali",
            320000000,
            "APT-EP-001",
            2015,
            1,
        ),
        property(
            2,
            "Casa Campestre Ciudad Jardín",
            "Carrera 105 #14-80, Ciudad Jardín, Cali",
            850000000,
            "CSA-CJ-002",
            2008,
            5,
        ),
        property(
            3,
            "Apartaestudio Granada",
            "Calle 16 Norte #9N-30, Granada, Cali",
            185000000,
            "APE-GR-003",
            2019,
            2,
        ),
        property(
            4,
            "Casa Colonial San Antonio",
            "Carrera 10 #2-15, San Antonio, Cali",
            450000000,
            "CSA-SA-004",
            1998,
            4,
        ),
        property(
            5,
            "Penthouse Normandía",
            "Av. 4 Norte #45-120, Normandía, Cali",
            1200000000,
            "PNT-NR-005",
            2021,
            3,
        ),
        property(
            6,
            "Apartamento Versalles",
            "Av. 5 Norte #23-50, Versalles, Cali",
            280000000,
            "APT-VS-006",
            2012,
            2,
        ),
        property(
            7,
            "Casa Dúplex Pance",
            "Calle 18 #122-35, Pance, Cali",
            950000000,
            "CSD-PN-007",
            2017,
            5,
        ),
        property(
            8,
            "Apartamento Santa Teresita",
            "Calle 4 Oeste #3A-20, Santa Teresita, Cali",
            390000000,
            "APT-ST-008",
            2010,
            1,
        ),
    ];

    let images = vec![
        image(1, 1, "https://images.unsplash.com/photo-1522708323590-d24dbb6b0267?w=800", true),
        image(2, 1, "https://images.unsplash.com/photo-1502672260266-1c1ef2d93688?w=800", false),
        image(3, 2, "https://images.unsplash.com/photo-1564013799919-ab600027ffc6?w=800", true),
        image(4, 2, "https://images.unsplash.com/photo-1583608205776-bfd35f0d9f83?w=800", true),
        image(5, 3, "https://images.unsplash.com/photo-1536376072261-38c75010e6c9?w=800", true),
        image(6, 4, "https://images.unsplash.com/photo-1600585154340-be6161a56a0c?w=800", true),
        image(7, 5, "https://images.unsplash.com/photo-1600607687939-ce8a6c25118c?w=800", true),
        image(8, 6, "https://images.unsplash.com/photo-1560448204-e02f11c3d0e2?w=800", false),
        image(9, 7, "https://images.unsplash.com/photo-1613490493576-7fde63acd811?w=800", true),
        image(10, 8, "https://images.unsplash.com/photo-1600566753086-00f18fb6b3ea?w=800", true),
    ];

    let traces = vec![
        trace(1, 1, (2015, 6, 12), "Venta inicial", 250000000, 7500000),
        trace(2, 1, (2020, 2, 28), "Reventa", 300000000, 9000000),
        trace(3, 2, (2008, 9, 5), "Venta inicial", 600000000, 18000000),
        trace(4, 4, (1998, 4, 20), "Venta inicial", 180000000, 5400000),
        trace(5, 4, (2012, 11, 8), "Reventa", 320000000, 9600000),
        trace(6, 5, (2021, 8, 15), "Venta inicial", 1100000000, 33000000),
        trace(7, 7, (2017, 3, 30), "Venta inicial", 870000000, 26100000),
    ];

    for o in owners {
        store.insert_owner(o).await?;
    }
    for p in properties {
        store.insert_property(p).await?;
    }
    for img in images {
        store.insert_image(img).await?;
    }
    for t in traces {
        store.insert_trace(t).await?;
    }

    Ok(())
}
